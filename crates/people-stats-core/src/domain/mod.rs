//! Domain models for people-stats.
//!
//! - `Person`: a fixture record
//! - `AggregateReport` / `AgeDistribution`: computed statistics with their report text
//! - `SuiteContext` / `TestResult`: what the execution engine hands to listeners

pub mod error;
pub mod execution;
pub mod person;
pub mod report;

pub use error::{Result, SinkError, SourceError, StatsError};
pub use execution::{ExecutionCounters, SuiteContext, SuiteSummary, TestResult, TestStatus};
pub use person::Person;
pub use report::{AgeDistribution, AggregateReport, AggregateValue};
