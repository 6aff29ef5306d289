//! Reporting sinks for steps and attachments.
//!
//! Aggregation steps and listeners talk to a [`Reporter`], which forwards to
//! a [`ReportSink`]. Sinks may fail; the `Reporter` logs and counts those
//! failures and never hands them back to the caller.

pub mod fakes;

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::SinkError;

pub const TEXT_PLAIN: &str = "text/plain";

/// A single entry delivered to a sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportEntry {
    Step {
        message: String,
        at: DateTime<Utc>,
    },
    Attachment {
        title: String,
        mime_type: String,
        content: String,
        at: DateTime<Utc>,
    },
}

impl ReportEntry {
    pub fn step(message: &str) -> Self {
        ReportEntry::Step {
            message: message.to_string(),
            at: Utc::now(),
        }
    }

    pub fn attachment(title: &str, mime_type: &str, content: &str) -> Self {
        ReportEntry::Attachment {
            title: title.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_string(),
            at: Utc::now(),
        }
    }
}

/// Backend accepting report steps and attachments.
pub trait ReportSink: Send + Sync {
    fn step(&self, message: &str) -> Result<(), SinkError>;

    fn attach(&self, title: &str, mime_type: &str, content: &str) -> Result<(), SinkError>;
}

/// Fire-and-forget handle over a [`ReportSink`].
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn ReportSink>,
    swallowed: Arc<AtomicU64>,
}

impl Reporter {
    pub fn new(sink: Arc<dyn ReportSink>) -> Self {
        Self {
            sink,
            swallowed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Reporter that logs everything through `tracing`.
    pub fn tracing() -> Self {
        Self::new(Arc::new(TracingSink))
    }

    pub fn step(&self, message: &str) {
        if let Err(e) = self.sink.step(message) {
            self.swallow("step", &e);
        }
    }

    pub fn attach(&self, title: &str, mime_type: &str, content: &str) {
        if let Err(e) = self.sink.attach(title, mime_type, content) {
            self.swallow("attachment", &e);
        }
    }

    pub fn attach_text(&self, title: &str, content: &str) {
        self.attach(title, TEXT_PLAIN, content);
    }

    /// Number of sink calls that failed and were dropped.
    pub fn swallowed(&self) -> u64 {
        self.swallowed.load(Ordering::Relaxed)
    }

    fn swallow(&self, what: &str, error: &SinkError) {
        self.swallowed.fetch_add(1, Ordering::Relaxed);
        warn!(event = "report.sink_failed", kind = what, error = %error);
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("swallowed", &self.swallowed())
            .finish_non_exhaustive()
    }
}

/// Sink that emits every entry as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn step(&self, message: &str) -> Result<(), SinkError> {
        info!(event = "report.step", message = %message);
        Ok(())
    }

    fn attach(&self, title: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        info!(
            event = "report.attachment",
            title = %title,
            mime_type = %mime_type,
            bytes = content.len(),
        );
        tracing::debug!(title = %title, "\n{}", content);
        Ok(())
    }
}

/// Sink writing one JSON object per line to `W`.
pub struct JsonLinesSink<W: Write + Send> {
    out: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer, e.g. to inspect a buffer in tests.
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(w) => w,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_entry(&self, entry: &ReportEntry) -> Result<(), SinkError> {
        let line = serde_json::to_string(entry)?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| SinkError::Unavailable("json lines writer poisoned".to_string()))?;
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

impl<W: Write + Send> ReportSink for JsonLinesSink<W> {
    fn step(&self, message: &str) -> Result<(), SinkError> {
        self.write_entry(&ReportEntry::step(message))
    }

    fn attach(&self, title: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        self.write_entry(&ReportEntry::attachment(title, mime_type, content))
    }
}

/// Sink forwarding to several sinks; every sink is tried, the first error wins.
#[derive(Default)]
pub struct TeeSink {
    sinks: Vec<Arc<dyn ReportSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Arc<dyn ReportSink>>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: Arc<dyn ReportSink>) {
        self.sinks.push(sink);
    }

    fn each<F>(&self, f: F) -> Result<(), SinkError>
    where
        F: Fn(&dyn ReportSink) -> Result<(), SinkError>,
    {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = f(sink.as_ref()) {
                first_err.get_or_insert(e);
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}

impl ReportSink for TeeSink {
    fn step(&self, message: &str) -> Result<(), SinkError> {
        self.each(|s| s.step(message))
    }

    fn attach(&self, title: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        self.each(|s| s.attach(title, mime_type, content))
    }
}
