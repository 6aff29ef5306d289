//! people-stats core library
//!
//! Person fixtures, reporting aggregation steps and the execution listener.

pub mod config;
pub mod domain;
pub mod listener;
pub mod obs;
pub mod reporter;
pub mod source;
pub mod steps;
pub mod telemetry;

pub use config::{AgeRange, AverageBounds, CutPoints, SuiteConfig};
pub use domain::{
    AgeDistribution, AggregateReport, AggregateValue, ExecutionCounters, Person, Result,
    SinkError, SourceError, StatsError, SuiteContext, SuiteSummary, TestResult, TestStatus,
};
pub use listener::{render_failure_trace, ConsoleListener, ExecutionListener};
pub use obs::{
    emit_setup_failed, emit_suite_finished, emit_suite_started, emit_test_finished, SuiteSpan,
};
pub use reporter::{
    JsonLinesSink, ReportEntry, ReportSink, Reporter, TeeSink, TracingSink, TEXT_PLAIN,
};
pub use source::{CsvSource, RecordSource, StaticSource, YamlSource};
pub use steps::PeopleSteps;
pub use telemetry::init_tracing;

/// people-stats version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
