//! Error taxonomy for people-stats.

use std::path::PathBuf;

/// Errors produced while loading person records.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors reported by a [`ReportSink`](crate::reporter::ReportSink).
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("sink serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// people-stats domain errors.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A verification step found a value violating its expectation.
    #[error("assertion failed: {0}")]
    AssertionFailed(String),

    #[error("source error: {0}")]
    Source(#[from] SourceError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatsError {
    pub(crate) fn assertion(message: impl Into<String>) -> Self {
        StatsError::AssertionFailed(message.into())
    }

    /// Whether this error came from a verification step.
    pub fn is_assertion(&self) -> bool {
        matches!(self, StatsError::AssertionFailed(_))
    }
}

/// Result type for people-stats operations.
pub type Result<T> = std::result::Result<T, StatsError>;
