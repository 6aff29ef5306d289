//! Test execution listeners.
//!
//! An engine calls the [`ExecutionListener`] hooks in the order
//! `on_start`, then per test `on_test_start` followed by exactly one of
//! `on_test_success` / `on_test_failure` / `on_test_skipped`, then
//! `on_finish`. Listeners never fail: console writes and report calls are
//! best-effort.

use std::fmt;
use std::io::Write;

use tracing::warn;

use crate::domain::{SuiteContext, SuiteSummary, TestResult};
use crate::reporter::Reporter;

/// Lifecycle hooks fired by a test engine.
pub trait ExecutionListener {
    fn on_start(&mut self, _context: &SuiteContext) {}

    fn on_test_start(&mut self, _result: &TestResult) {}

    fn on_test_success(&mut self, _result: &TestResult) {}

    fn on_test_failure(&mut self, _result: &TestResult) {}

    fn on_test_skipped(&mut self, _result: &TestResult) {}

    fn on_finish(&mut self, _context: &SuiteContext) {}
}

/// Render an error and its causes, outermost first.
pub fn render_failure_trace(error: &anyhow::Error) -> String {
    let mut out = format!("{}\n", error);
    for cause in error.chain().skip(1) {
        out.push_str(&format!("    caused by: {}\n", cause));
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Finished,
}

/// Listener that prints markers to a writer and mirrors them as report steps.
pub struct ConsoleListener<W: Write> {
    out: W,
    reporter: Reporter,
    phase: Phase,
    summary: Option<SuiteSummary>,
}

impl ConsoleListener<std::io::Stdout> {
    pub fn stdout(reporter: Reporter) -> Self {
        Self::new(std::io::stdout(), reporter)
    }
}

impl<W: Write> ConsoleListener<W> {
    pub fn new(out: W, reporter: Reporter) -> Self {
        Self {
            out,
            reporter,
            phase: Phase::Idle,
            summary: None,
        }
    }

    /// Summary computed by the last `on_finish`.
    pub fn summary(&self) -> Option<&SuiteSummary> {
        self.summary.as_ref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args) {
            warn!(event = "listener.write_failed", error = %e);
        }
    }

    fn expect_running(&self, hook: &str, test: &str) {
        if self.phase != Phase::Running {
            warn!(
                event = "listener.out_of_order",
                hook = hook,
                test = %test,
                phase = ?self.phase,
            );
        }
    }
}

impl<W: Write> ExecutionListener for ConsoleListener<W> {
    fn on_start(&mut self, context: &SuiteContext) {
        if self.phase == Phase::Running {
            warn!(event = "listener.out_of_order", hook = "on_start", suite = %context.name);
        }
        self.phase = Phase::Running;
        self.summary = None;

        self.line(format_args!("\n========== STARTING TEST EXECUTION =========="));
        self.line(format_args!("Test Suite: {}", context.name));
        self.line(format_args!("=============================================\n"));
    }

    fn on_test_start(&mut self, result: &TestResult) {
        self.expect_running("on_test_start", &result.method_name);
        self.line(format_args!("▶ STARTING TEST: {}", result.method_name));
        self.reporter
            .step(&format!("Test started: {}", result.method_name));
    }

    fn on_test_success(&mut self, result: &TestResult) {
        self.expect_running("on_test_success", &result.method_name);
        let duration = result.duration_ms();
        self.line(format_args!(
            "✓ PASSED: {} (Duration: {}ms)",
            result.method_name, duration
        ));
        self.reporter
            .step(&format!("Test passed in {}ms", duration));
    }

    fn on_test_failure(&mut self, result: &TestResult) {
        self.expect_running("on_test_failure", &result.method_name);
        self.line(format_args!("✗ FAILED: {}", result.method_name));

        if let Some(error) = &result.failure {
            self.line(format_args!("  Reason: {}", error));
            self.reporter
                .attach_text("Failure Reason", &format!("{:#}", error));
            self.reporter
                .attach_text("Stack Trace", &render_failure_trace(error));
        }
    }

    fn on_test_skipped(&mut self, result: &TestResult) {
        self.expect_running("on_test_skipped", &result.method_name);
        self.line(format_args!("⊘ SKIPPED: {}", result.method_name));
        self.reporter
            .step(&format!("Test skipped: {}", result.method_name));
    }

    fn on_finish(&mut self, context: &SuiteContext) {
        if self.phase != Phase::Running {
            warn!(event = "listener.out_of_order", hook = "on_finish", suite = %context.name);
        }
        self.phase = Phase::Finished;

        let summary = SuiteSummary::from_context(context);
        if !summary.counters.is_balanced() {
            warn!(
                event = "listener.unbalanced_counts",
                suite = %context.name,
                total = summary.counters.total,
                passed = summary.counters.passed,
                failed = summary.counters.failed,
                skipped = summary.counters.skipped,
            );
        }
        let block = summary.render();
        self.line(format_args!("{}", block));
        self.summary = Some(summary);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::TestStatus;
    use crate::reporter::fakes::{FailingSink, MemorySink};

    fn listener() -> (ConsoleListener<Vec<u8>>, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (
            ConsoleListener::new(Vec::new(), Reporter::new(sink.clone())),
            sink,
        )
    }

    fn output(listener: ConsoleListener<Vec<u8>>) -> String {
        String::from_utf8(listener.into_inner()).expect("utf8")
    }

    #[test]
    fn test_banner_names_suite() {
        let (mut l, _) = listener();
        l.on_start(&SuiteContext::new("People Suite"));
        let out = output(l);
        assert!(out.contains("STARTING TEST EXECUTION"));
        assert!(out.contains("Test Suite: People Suite"));
    }

    #[test]
    fn test_success_reports_duration() {
        let (mut l, sink) = listener();
        l.on_start(&SuiteContext::new("s"));
        let result = TestResult::new("average_age", 1_000, 1_042);
        l.on_test_start(&result);
        l.on_test_success(&result);

        assert_eq!(
            sink.steps(),
            vec!["Test started: average_age", "Test passed in 42ms"]
        );
        let out = output(l);
        assert!(out.contains("▶ STARTING TEST: average_age"));
        assert!(out.contains("✓ PASSED: average_age (Duration: 42ms)"));
    }

    #[test]
    fn test_failure_attaches_reason_and_trace() {
        let (mut l, sink) = listener();
        l.on_start(&SuiteContext::new("s"));

        let cause = anyhow::anyhow!("Email should contain @ for: Bob").context("verify all emails");
        let result = TestResult::new("email_validation", 0, 5).with_failure(cause);
        l.on_test_start(&result);
        l.on_test_failure(&result);

        assert_eq!(
            sink.attachment("Failure Reason").as_deref(),
            Some("verify all emails: Email should contain @ for: Bob")
        );
        assert_eq!(
            sink.attachment("Stack Trace").as_deref(),
            Some("verify all emails\n    caused by: Email should contain @ for: Bob\n")
        );
        let out = output(l);
        assert!(out.contains("✗ FAILED: email_validation"));
        assert!(out.contains("  Reason: verify all emails"));
    }

    #[test]
    fn test_failure_without_cause_has_no_attachments() {
        let (mut l, sink) = listener();
        l.on_start(&SuiteContext::new("s"));
        l.on_test_failure(&TestResult::new("t", 0, 0));
        assert!(sink.attachments().is_empty());
    }

    #[test]
    fn test_skip_marker() {
        let (mut l, sink) = listener();
        l.on_start(&SuiteContext::new("s"));
        l.on_test_skipped(&TestResult::new("oldest", 0, 0));
        assert_eq!(sink.steps(), vec!["Test skipped: oldest"]);
        assert!(output(l).contains("⊘ SKIPPED: oldest"));
    }

    #[test]
    fn test_finish_summary_mixed_outcomes() {
        let (mut l, _) = listener();
        let mut ctx = SuiteContext::new("People Suite");
        l.on_start(&ctx);
        for (name, status) in [
            ("a", TestStatus::Passed),
            ("b", TestStatus::Failed),
            ("c", TestStatus::Skipped),
        ] {
            ctx.register(name);
            ctx.record(name, status);
        }
        l.on_finish(&ctx);

        let summary = l.summary().expect("summary").clone();
        assert_eq!(
            summary.one_line(),
            "Total: 3, Passed: 1, Failed: 1, Skipped: 1, Success Rate: 33.33%"
        );
        let out = output(l);
        assert!(out.contains("Success Rate: 33.33%"));
    }

    #[test]
    fn test_out_of_order_events_are_still_processed() {
        let (mut l, sink) = listener();
        let ctx = SuiteContext::new("s");

        l.on_test_skipped(&TestResult::new("early", 0, 0));
        l.on_start(&ctx);
        l.on_finish(&ctx);
        assert!(l.summary().is_some());
        l.on_test_skipped(&TestResult::new("late", 0, 0));

        l.on_start(&ctx);
        assert!(l.summary().is_none(), "a new run clears the old summary");

        assert_eq!(
            sink.steps(),
            vec!["Test skipped: early", "Test skipped: late"]
        );
        let out = output(l);
        assert!(out.contains("⊘ SKIPPED: early"));
        assert!(out.contains("⊘ SKIPPED: late"));
    }

    #[test]
    fn test_finish_empty_suite_is_zero_rate() {
        let (mut l, _) = listener();
        let ctx = SuiteContext::new("empty");
        l.on_start(&ctx);
        l.on_finish(&ctx);
        assert_eq!(l.summary().map(|s| s.success_rate), Some(0.0));
    }

    #[test]
    fn test_sink_failures_do_not_escape() {
        let reporter = Reporter::new(Arc::new(FailingSink));
        let mut l = ConsoleListener::new(Vec::new(), reporter.clone());
        let ctx = SuiteContext::new("s");
        l.on_start(&ctx);
        let result = TestResult::new("t", 0, 1).with_failure(anyhow::anyhow!("boom"));
        l.on_test_start(&result);
        l.on_test_failure(&result);
        l.on_finish(&ctx);
        assert_eq!(reporter.swallowed(), 3);
    }

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failures_do_not_escape() {
        let mut l = ConsoleListener::new(BrokenWriter, Reporter::new(Arc::new(MemorySink::new())));
        let ctx = SuiteContext::new("s");
        l.on_start(&ctx);
        l.on_test_skipped(&TestResult::new("t", 0, 0));
        l.on_finish(&ctx);
        assert!(l.summary().is_some());
    }
}
