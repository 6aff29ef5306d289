//! Scenario definitions.

use people_stats_core::{PeopleSteps, Person};

/// What a scenario body sees: the shared steps and the people loaded at setup.
pub struct ScenarioContext<'a> {
    pub steps: &'a PeopleSteps,
    pub people: &'a [Person],
}

pub type ScenarioBody = Box<dyn Fn(&ScenarioContext<'_>) -> anyhow::Result<()>>;

/// A named, grouped test body.
pub struct Scenario {
    /// Unique scenario name.
    pub name: String,

    /// Human-readable description.
    pub description: String,

    /// Groups used for selection (e.g. `smoke`, `regression`).
    pub groups: Vec<String>,

    /// Disabled scenarios are reported as skipped.
    pub enabled: bool,

    body: ScenarioBody,
}

impl Scenario {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&ScenarioContext<'_>) -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            description: String::new(),
            groups: Vec::new(),
            enabled: true,
            body: Box::new(body),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn in_groups(mut self, groups: &[&str]) -> Self {
        self.groups = groups.iter().map(|g| g.to_string()).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub(crate) fn run(&self, ctx: &ScenarioContext<'_>) -> anyhow::Result<()> {
        (self.body)(ctx)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("groups", &self.groups)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}
