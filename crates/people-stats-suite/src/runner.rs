//! Sequential scenario engine driving execution listeners.

use chrono::Utc;
use people_stats_core::{
    emit_setup_failed, emit_suite_finished, emit_suite_started, emit_test_finished,
    ExecutionListener, PeopleSteps, Person, SuiteContext, SuiteSpan, SuiteSummary, TestResult,
    TestStatus,
};
use serde::Serialize;
use tracing::info;

use crate::scenario::{Scenario, ScenarioContext};

pub type SetupFn = Box<dyn Fn(&PeopleSteps) -> anyhow::Result<Vec<Person>>>;

/// Result of one scenario run.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub status: TestStatus,
    pub duration_ms: u64,
    /// Failure cause, or the reason a scenario was skipped.
    pub message: Option<String>,
}

/// Result of a whole suite run.
#[derive(Debug, Clone, Serialize)]
pub struct SuiteOutcome {
    pub run_id: String,
    pub summary: SuiteSummary,
    pub scenarios: Vec<ScenarioOutcome>,
    pub duration_ms: u64,
    /// Why setup failed; every scenario was skipped when this is set.
    pub setup_error: Option<String>,
}

impl SuiteOutcome {
    /// No scenario failed and the setup loaded its data.
    pub fn success(&self) -> bool {
        self.summary.counters.failed == 0 && self.setup_error.is_none()
    }

    pub fn outcome(&self, name: &str) -> Option<&ScenarioOutcome> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.scenarios.iter().filter(|s| s.status == status).count()
    }
}

/// A named group of scenarios sharing one setup.
pub struct Suite {
    name: String,
    steps: PeopleSteps,
    setup: SetupFn,
    scenarios: Vec<Scenario>,
    groups: Vec<String>,
}

impl Suite {
    pub fn new<F>(name: impl Into<String>, steps: PeopleSteps, setup: F) -> Self
    where
        F: Fn(&PeopleSteps) -> anyhow::Result<Vec<Person>> + 'static,
    {
        Self {
            name: name.into(),
            steps,
            setup: Box::new(setup),
            scenarios: Vec::new(),
            groups: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add(&mut self, scenario: Scenario) -> &mut Self {
        self.scenarios.push(scenario);
        self
    }

    pub fn with_scenario(mut self, scenario: Scenario) -> Self {
        self.scenarios.push(scenario);
        self
    }

    /// Only run scenarios in at least one of these groups; empty runs all.
    pub fn select_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    fn selected(&self) -> Vec<&Scenario> {
        self.scenarios
            .iter()
            .filter(|s| self.groups.is_empty() || s.groups.iter().any(|g| self.groups.contains(g)))
            .collect()
    }

    /// Run setup once, then every selected scenario in order.
    ///
    /// A failed setup or a disabled scenario yields a skip; a scenario body
    /// returning an error yields a failure. Nothing aborts the run.
    pub fn run(&self, listener: &mut dyn ExecutionListener) -> SuiteOutcome {
        let span = SuiteSpan::enter(&self.name);
        let started = now_millis();

        let selected = self.selected();
        let mut context = SuiteContext::new(&self.name);
        for scenario in &selected {
            context.register(&scenario.name);
        }

        emit_suite_started(&self.name, selected.len());
        listener.on_start(&context);

        let people = match (self.setup)(&self.steps) {
            Ok(people) => Ok(people),
            Err(e) => {
                emit_setup_failed(&self.name, &e);
                Err(format!("setup failed: {:#}", e))
            }
        };

        let mut outcomes = Vec::with_capacity(selected.len());
        for scenario in selected {
            let outcome = self.run_one(scenario, &people, listener);
            context.record(&outcome.name, outcome.status);
            emit_test_finished(&outcome.name, outcome.status, outcome.duration_ms);
            outcomes.push(outcome);
        }

        listener.on_finish(&context);

        let duration_ms = now_millis().saturating_sub(started).max(0) as u64;
        let summary = SuiteSummary::from_context(&context);
        emit_suite_finished(&self.name, &summary.counters, duration_ms);

        SuiteOutcome {
            run_id: span.run_id().to_string(),
            summary,
            scenarios: outcomes,
            duration_ms,
            setup_error: people.err(),
        }
    }

    fn run_one(
        &self,
        scenario: &Scenario,
        people: &Result<Vec<Person>, String>,
        listener: &mut dyn ExecutionListener,
    ) -> ScenarioOutcome {
        let start = now_millis();
        listener.on_test_start(&TestResult::new(&scenario.name, start, start));

        let people = match (people, scenario.enabled) {
            (_, false) => Err("scenario disabled".to_string()),
            (Err(reason), true) => Err(reason.clone()),
            (Ok(people), true) => Ok(people.as_slice()),
        };

        let people = match people {
            Ok(people) => people,
            Err(reason) => {
                info!(scenario = %scenario.name, reason = %reason, "Skipping scenario");
                listener.on_test_skipped(&TestResult::new(&scenario.name, start, start));
                return ScenarioOutcome {
                    name: scenario.name.clone(),
                    status: TestStatus::Skipped,
                    duration_ms: 0,
                    message: Some(reason),
                };
            }
        };

        let ctx = ScenarioContext {
            steps: &self.steps,
            people,
        };
        let result = scenario.run(&ctx);
        let end = now_millis();
        let test = TestResult::new(&scenario.name, start, end);
        let duration_ms = test.duration_ms();

        match result {
            Ok(()) => {
                listener.on_test_success(&test);
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    status: TestStatus::Passed,
                    duration_ms,
                    message: None,
                }
            }
            Err(e) => {
                let message = format!("{:#}", e);
                listener.on_test_failure(&test.with_failure(e));
                ScenarioOutcome {
                    name: scenario.name.clone(),
                    status: TestStatus::Failed,
                    duration_ms,
                    message: Some(message),
                }
            }
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
