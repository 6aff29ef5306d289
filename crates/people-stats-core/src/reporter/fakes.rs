//! In-memory sinks (testing only)
//!
//! `MemorySink` records every entry for later assertions; `FailingSink`
//! rejects every call so callers can check that failures stay contained.

use std::sync::Mutex;

use crate::domain::SinkError;

use super::{ReportEntry, ReportSink};

/// Sink that keeps every entry in order.
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<ReportEntry>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<ReportEntry> {
        self.entries.lock().unwrap().clone()
    }

    /// Step messages in emission order.
    pub fn steps(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ReportEntry::Step { message, .. } => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(title, content)` pairs in emission order.
    pub fn attachments(&self) -> Vec<(String, String)> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                ReportEntry::Attachment { title, content, .. } => {
                    Some((title.clone(), content.clone()))
                }
                _ => None,
            })
            .collect()
    }

    /// Content of the most recent attachment with this title.
    pub fn attachment(&self, title: &str) -> Option<String> {
        self.attachments()
            .into_iter()
            .rev()
            .find(|(t, _)| t == title)
            .map(|(_, content)| content)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl ReportSink for MemorySink {
    fn step(&self, message: &str) -> Result<(), SinkError> {
        self.entries.lock().unwrap().push(ReportEntry::step(message));
        Ok(())
    }

    fn attach(&self, title: &str, mime_type: &str, content: &str) -> Result<(), SinkError> {
        self.entries
            .lock()
            .unwrap()
            .push(ReportEntry::attachment(title, mime_type, content));
        Ok(())
    }
}

/// Sink that rejects everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

impl ReportSink for FailingSink {
    fn step(&self, _message: &str) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("report backend offline".to_string()))
    }

    fn attach(&self, _title: &str, _mime_type: &str, _content: &str) -> Result<(), SinkError> {
        Err(SinkError::Unavailable("report backend offline".to_string()))
    }
}
