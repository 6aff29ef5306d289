//! Test execution records shared between the engine and its listeners.

use serde::{Deserialize, Serialize};

/// Outcome of one test invocation, as handed to listeners.
#[derive(Debug)]
pub struct TestResult {
    pub method_name: String,
    pub start_millis: i64,
    pub end_millis: i64,
    /// Cause of a failure; `None` for passes and skips.
    pub failure: Option<anyhow::Error>,
}

impl TestResult {
    pub fn new(method_name: impl Into<String>, start_millis: i64, end_millis: i64) -> Self {
        Self {
            method_name: method_name.into(),
            start_millis,
            end_millis,
            failure: None,
        }
    }

    pub fn with_failure(mut self, failure: anyhow::Error) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Elapsed time in milliseconds, clamped at zero.
    pub fn duration_ms(&self) -> u64 {
        self.end_millis.saturating_sub(self.start_millis).max(0) as u64
    }
}

/// Terminal state of a test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// Engine-owned suite state that listeners read at suite end.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuiteContext {
    pub name: String,
    pub all_tests: Vec<String>,
    pub passed: Vec<String>,
    pub failed: Vec<String>,
    pub skipped: Vec<String>,
}

impl SuiteContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a test invocation that will reach a terminal outcome.
    pub fn register(&mut self, test_name: impl Into<String>) {
        self.all_tests.push(test_name.into());
    }

    /// Record the terminal outcome of a registered test.
    pub fn record(&mut self, test_name: impl Into<String>, status: TestStatus) {
        let name = test_name.into();
        match status {
            TestStatus::Passed => self.passed.push(name),
            TestStatus::Failed => self.failed.push(name),
            TestStatus::Skipped => self.skipped.push(name),
        }
    }

    pub fn counters(&self) -> ExecutionCounters {
        ExecutionCounters {
            total: self.all_tests.len(),
            passed: self.passed.len(),
            failed: self.failed.len(),
            skipped: self.skipped.len(),
        }
    }
}

/// Snapshot of suite counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExecutionCounters {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl ExecutionCounters {
    /// Passed share in percent; `0.0` for an empty suite.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 * 100.0 / self.total as f64
        }
    }

    /// `passed + failed + skipped == total`.
    pub fn is_balanced(&self) -> bool {
        self.passed + self.failed + self.skipped == self.total
    }
}

/// Suite summary emitted by a listener at suite end.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SuiteSummary {
    pub suite_name: String,
    pub counters: ExecutionCounters,
    pub success_rate: f64,
}

impl SuiteSummary {
    pub fn from_context(context: &SuiteContext) -> Self {
        let counters = context.counters();
        Self {
            suite_name: context.name.clone(),
            success_rate: counters.success_rate(),
            counters,
        }
    }

    /// One-line form: `Total: 3, Passed: 1, Failed: 1, Skipped: 1, Success Rate: 33.33%`.
    pub fn one_line(&self) -> String {
        format!(
            "Total: {}, Passed: {}, Failed: {}, Skipped: {}, Success Rate: {:.2}%",
            self.counters.total,
            self.counters.passed,
            self.counters.failed,
            self.counters.skipped,
            self.success_rate
        )
    }

    /// Multi-line summary block.
    pub fn render(&self) -> String {
        format!(
            "\n========== TEST EXECUTION SUMMARY ==========\n\
             Total tests run: {}\n\
             Passed: {}\n\
             Failed: {}\n\
             Skipped: {}\n\
             Success Rate: {:.2}%\n\
             ============================================\n",
            self.counters.total,
            self.counters.passed,
            self.counters.failed,
            self.counters.skipped,
            self.success_rate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_context() -> SuiteContext {
        let mut ctx = SuiteContext::new("People Suite");
        for name in ["a", "b", "c"] {
            ctx.register(name);
        }
        ctx.record("a", TestStatus::Passed);
        ctx.record("b", TestStatus::Failed);
        ctx.record("c", TestStatus::Skipped);
        ctx
    }

    #[test]
    fn test_duration_is_clamped() {
        assert_eq!(TestResult::new("t", 100, 250).duration_ms(), 150);
        assert_eq!(TestResult::new("t", 250, 100).duration_ms(), 0);
        assert_eq!(
            TestResult::new("t", i64::MIN, i64::MAX).duration_ms(),
            i64::MAX as u64
        );
        assert_eq!(TestResult::new("t", i64::MAX, i64::MIN).duration_ms(), 0);
    }

    #[test]
    fn test_counters_from_context() {
        let counters = mixed_context().counters();
        assert_eq!(
            counters,
            ExecutionCounters {
                total: 3,
                passed: 1,
                failed: 1,
                skipped: 1
            }
        );
        assert!(counters.is_balanced());
    }

    #[test]
    fn test_success_rate_guards_zero_total() {
        assert_eq!(ExecutionCounters::default().success_rate(), 0.0);
    }

    #[test]
    fn test_summary_one_line() {
        let summary = SuiteSummary::from_context(&mixed_context());
        assert_eq!(
            summary.one_line(),
            "Total: 3, Passed: 1, Failed: 1, Skipped: 1, Success Rate: 33.33%"
        );
    }

    #[test]
    fn test_summary_render_block() {
        let text = SuiteSummary::from_context(&mixed_context()).render();
        assert!(text.contains("TEST EXECUTION SUMMARY"));
        assert!(text.contains("Total tests run: 3\n"));
        assert!(text.contains("Skipped: 1\n"));
        assert!(text.contains("Success Rate: 33.33%\n"));
    }
}
