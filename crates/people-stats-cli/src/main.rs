//! people-stats CLI
//!
//! Runs the standard people statistics suite against CSV and YAML fixtures.
//!
//! ## Commands
//!
//! - `run`: execute the suite and print the execution summary
//! - `config`: print the effective configuration

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};

use people_stats_core::{
    ConsoleListener, JsonLinesSink, PeopleSteps, ReportSink, Reporter, SuiteConfig, TeeSink,
    TracingSink,
};
use people_stats_suite::people_suite;

#[derive(Parser)]
#[command(name = "people-stats")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "People statistics test suite runner", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the standard suite
    Run {
        #[command(flatten)]
        suite: SuiteArgs,

        /// Mirror report steps and attachments to a JSON-lines file
        #[arg(long)]
        report_jsonl: Option<PathBuf>,

        /// Print the final outcome as JSON on stdout (listener output moves to stderr)
        #[arg(long)]
        summary_json: bool,
    },

    /// Print the effective configuration as JSON
    Config {
        #[command(flatten)]
        suite: SuiteArgs,
    },
}

#[derive(Args, Debug, Default)]
struct SuiteArgs {
    /// Suite configuration file (TOML)
    #[arg(long, env = "PEOPLE_STATS_CONFIG")]
    config: Option<PathBuf>,

    /// CSV fixture path
    #[arg(long, env = "PEOPLE_STATS_CSV")]
    csv: Option<PathBuf>,

    /// YAML fixture path
    #[arg(long, env = "PEOPLE_STATS_YAML")]
    yaml: Option<PathBuf>,

    /// Only run scenarios in this group (repeatable)
    #[arg(long = "group")]
    groups: Vec<String>,

    /// Report this scenario as skipped (repeatable)
    #[arg(long = "disable")]
    disabled: Vec<String>,
}

/// Config file (or defaults) with command-line overrides applied.
fn effective_config(args: &SuiteArgs) -> Result<SuiteConfig> {
    let mut config = match &args.config {
        Some(path) => SuiteConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SuiteConfig::default(),
    };

    if let Some(csv) = &args.csv {
        config.csv_path = csv.clone();
    }
    if let Some(yaml) = &args.yaml {
        config.yaml_path = yaml.clone();
    }
    if !args.groups.is_empty() {
        config.groups = args.groups.clone();
    }
    config.disabled.extend(args.disabled.iter().cloned());

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

fn build_reporter(report_jsonl: Option<&Path>) -> Result<Reporter> {
    let tracing_sink: Arc<dyn ReportSink> = Arc::new(TracingSink);
    let mut tee = TeeSink::new(vec![tracing_sink]);
    if let Some(path) = report_jsonl {
        let file = File::create(path)
            .with_context(|| format!("Failed to create report file {}", path.display()))?;
        let sink: Arc<dyn ReportSink> = Arc::new(JsonLinesSink::new(BufWriter::new(file)));
        tee.push(sink);
    }
    Ok(Reporter::new(Arc::new(tee)))
}

fn cmd_run(args: &SuiteArgs, report_jsonl: Option<&Path>, summary_json: bool) -> Result<()> {
    let config = effective_config(args)?;
    let reporter = build_reporter(report_jsonl)?;

    info!(
        suite = %config.suite_name,
        csv = %config.csv_path.display(),
        yaml = %config.yaml_path.display(),
        "Running suite"
    );

    let suite = people_suite(&config, PeopleSteps::new(reporter.clone()));
    let console: Box<dyn Write> = if summary_json {
        Box::new(std::io::stderr())
    } else {
        Box::new(std::io::stdout())
    };
    let mut listener = ConsoleListener::new(console, reporter.clone());
    let outcome = suite.run(&mut listener);

    if reporter.swallowed() > 0 {
        tracing::warn!(dropped = reporter.swallowed(), "Some report entries were not delivered");
    }

    if summary_json {
        let json = serde_json::to_string_pretty(&outcome).context("serialize outcome")?;
        println!("{}", json);
    }

    if let Some(reason) = &outcome.setup_error {
        anyhow::bail!(
            "{}: all {} scenarios skipped",
            reason,
            outcome.summary.counters.total
        );
    }

    if outcome.success() {
        Ok(())
    } else {
        anyhow::bail!(
            "{} of {} scenarios failed",
            outcome.summary.counters.failed,
            outcome.summary.counters.total
        )
    }
}

fn cmd_config(args: &SuiteArgs) -> Result<()> {
    let config = effective_config(args)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    people_stats_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Run {
            suite,
            report_jsonl,
            summary_json,
        } => cmd_run(&suite, report_jsonl.as_deref(), summary_json),
        Commands::Config { suite } => cmd_config(&suite),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run_flags() {
        let cli = Cli::try_parse_from([
            "people-stats",
            "run",
            "--csv",
            "a.csv",
            "--group",
            "smoke",
            "--group",
            "validation",
            "--summary-json",
        ])
        .expect("parse");

        match cli.command {
            Commands::Run {
                suite,
                summary_json,
                report_jsonl,
            } => {
                assert_eq!(suite.csv, Some(PathBuf::from("a.csv")));
                assert_eq!(suite.groups, vec!["smoke", "validation"]);
                assert!(summary_json);
                assert!(report_jsonl.is_none());
            }
            Commands::Config { .. } => panic!("expected run"),
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("suite.toml");
        std::fs::write(&path, "suite_name = \"Nightly\"\ngroups = [\"regression\"]\n")
            .expect("write config");

        let args = SuiteArgs {
            config: Some(path),
            yaml: Some(PathBuf::from("other.yaml")),
            disabled: vec!["email_validation".to_string()],
            ..SuiteArgs::default()
        };
        let config = effective_config(&args).expect("config");

        assert_eq!(config.suite_name, "Nightly");
        assert_eq!(config.groups, vec!["regression"]);
        assert_eq!(config.yaml_path, PathBuf::from("other.yaml"));
        assert_eq!(config.csv_path, PathBuf::from("fixtures/people.csv"));
        assert!(config.is_disabled("email_validation"));
    }

    #[test]
    fn test_run_writes_json_lines_report() {
        let dir = tempfile::tempdir().expect("tempdir");
        let csv = dir.path().join("people.csv");
        let yaml = dir.path().join("people.yaml");
        let report = dir.path().join("report.jsonl");
        std::fs::write(&csv, "name,age,email\nAlice,25,a@x.com\n").expect("csv");
        std::fs::write(&yaml, "- name: Bob\n  age: 65\n  email: b@x.com\n").expect("yaml");

        let args = SuiteArgs {
            csv: Some(csv),
            yaml: Some(yaml),
            groups: vec!["smoke".to_string()],
            ..SuiteArgs::default()
        };
        cmd_run(&args, Some(&report), true).expect("suite passes");

        let written = std::fs::read_to_string(&report).expect("report");
        let first: serde_json::Value =
            serde_json::from_str(written.lines().next().expect("one line")).expect("json");
        assert_eq!(first["kind"], "step");
        assert_eq!(first["message"], "Loaded 1 people from CSV");
        assert!(written.contains("All 2 emails are valid"));
    }

    #[test]
    fn test_run_fails_when_fixtures_are_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let yaml = dir.path().join("people.yaml");
        std::fs::write(&yaml, "- name: Bob\n  age: 65\n  email: b@x.com\n").expect("yaml");

        let args = SuiteArgs {
            csv: Some(dir.path().join("missing.csv")),
            yaml: Some(yaml),
            ..SuiteArgs::default()
        };
        let err = cmd_run(&args, None, true).expect_err("setup failure must fail the run");
        let message = err.to_string();
        assert!(message.starts_with("setup failed"), "{}", message);
        assert!(message.contains("missing.csv"));
    }
}
