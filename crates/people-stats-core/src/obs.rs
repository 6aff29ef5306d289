//! Structured tracing events for suite execution.
//!
//! Events are emitted at `info!` level with an `event` field naming them
//! (`suite.started`, `test.finished`, ...). Wrap a run in [`SuiteSpan`] to
//! tag everything with the run id.

use tracing::info;
use uuid::Uuid;

use crate::domain::{ExecutionCounters, TestStatus};

/// RAII guard holding a suite-scoped span open.
pub struct SuiteSpan {
    run_id: Uuid,
    _span: tracing::span::EnteredSpan,
}

impl SuiteSpan {
    /// Enter a new span tagged with a fresh run id.
    pub fn enter(suite_name: &str) -> Self {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("people_stats.suite", run_id = %run_id, suite = %suite_name);
        Self {
            run_id,
            _span: span.entered(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }
}

pub fn emit_suite_started(suite_name: &str, scheduled: usize) {
    info!(event = "suite.started", suite = %suite_name, scheduled = scheduled);
}

pub fn emit_setup_failed(suite_name: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(event = "suite.setup_failed", suite = %suite_name, error = %error);
}

pub fn emit_test_finished(test_name: &str, status: TestStatus, duration_ms: u64) {
    info!(
        event = "test.finished",
        test = %test_name,
        status = ?status,
        duration_ms = duration_ms,
    );
}

pub fn emit_suite_finished(suite_name: &str, counters: &ExecutionCounters, duration_ms: u64) {
    info!(
        event = "suite.finished",
        suite = %suite_name,
        total = counters.total,
        passed = counters.passed,
        failed = counters.failed,
        skipped = counters.skipped,
        success_rate = counters.success_rate(),
        duration_ms = duration_ms,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suite_span_ids_are_unique() {
        let a = SuiteSpan::enter("one");
        let a_id = a.run_id();
        drop(a);
        let b = SuiteSpan::enter("two");
        assert_ne!(a_id, b.run_id());
    }

    #[test]
    fn test_emitters_do_not_panic_without_subscriber() {
        emit_suite_started("s", 3);
        emit_test_finished("t", TestStatus::Passed, 12);
        emit_setup_failed("s", &"fixture missing");
        emit_suite_finished("s", &ExecutionCounters::default(), 0);
    }
}
