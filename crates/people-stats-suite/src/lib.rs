//! people-stats suite - scenario engine and standard scenarios
//!
//! Provides a sequential scenario engine that:
//! - Loads people once per suite and shares them across scenarios
//! - Drives `ExecutionListener` hooks for every scenario
//! - Reports setup failures and disabled scenarios as skips

pub mod people;
pub mod runner;
pub mod scenario;

pub use people::people_suite;
pub use runner::{ScenarioOutcome, Suite, SuiteOutcome};
pub use scenario::{Scenario, ScenarioContext};
