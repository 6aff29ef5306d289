//! The standard people statistics scenarios.

use anyhow::Context;
use people_stats_core::{PeopleSteps, RecordSource, SuiteConfig, TEXT_PLAIN};

use crate::runner::Suite;
use crate::scenario::Scenario;

pub const AVERAGE_AGE: &str = "average_age_in_range";
pub const OLDEST_PERSON: &str = "find_oldest_person";
pub const YOUNGEST_PERSON: &str = "find_youngest_person";
pub const AGE_DISTRIBUTION: &str = "age_group_distribution";
pub const EMAIL_VALIDATION: &str = "email_validation";
pub const COUNT_BY_AGE_RANGE: &str = "people_count_by_age_range";

/// Build the standard suite from `config`, loading the CSV then YAML fixture.
pub fn people_suite(config: &SuiteConfig, steps: PeopleSteps) -> Suite {
    let csv = config.csv_source();
    let yaml = config.yaml_source();

    let mut suite = Suite::new(&config.suite_name, steps, move |steps| {
        let sources: [&dyn RecordSource; 2] = [&csv, &yaml];
        steps
            .load_all(&sources)
            .context("load people from CSV and YAML fixtures")
    })
    .select_groups(config.groups.clone());

    let bounds = config.average_bounds;
    suite.add(gated(
        config,
        Scenario::new(AVERAGE_AGE, move |ctx| {
            let average = ctx.steps.average(ctx.people);
            ctx.steps.verify_in_range(average, bounds.min, bounds.max)?;
            Ok(())
        })
        .describe("Calculate and verify average age from combined data sources")
        .in_groups(&["smoke", "statistics"]),
    ));

    suite.add(gated(
        config,
        Scenario::new(OLDEST_PERSON, |ctx| {
            let oldest = ctx.steps.find_oldest(ctx.people);
            ctx.steps.verify_valid(oldest)?;
            if let Some(person) = oldest {
                ctx.steps.attach_details(person, "Oldest Person");
            }
            Ok(())
        })
        .describe("Find oldest person from all data sources")
        .in_groups(&["regression", "statistics"]),
    ));

    suite.add(gated(
        config,
        Scenario::new(YOUNGEST_PERSON, |ctx| {
            let youngest = ctx.steps.find_youngest(ctx.people);
            ctx.steps.verify_valid(youngest)?;
            if let Some(person) = youngest {
                ctx.steps.attach_details(person, "Youngest Person");
            }
            Ok(())
        })
        .describe("Find youngest person from all data sources")
        .in_groups(&["regression", "statistics"]),
    ));

    let cuts = config.distribution;
    suite.add(gated(
        config,
        Scenario::new(AGE_DISTRIBUTION, move |ctx| {
            ctx.steps
                .distribution(ctx.people, cuts.young_below, cuts.senior_from);
            Ok(())
        })
        .describe("Count people by age group")
        .in_groups(&["regression"]),
    ));

    suite.add(gated(
        config,
        Scenario::new(EMAIL_VALIDATION, |ctx| {
            ctx.steps.verify_all_emails_valid(ctx.people)?;
            Ok(())
        })
        .describe("Verify all people have valid email addresses")
        .in_groups(&["smoke", "validation"]),
    ));

    for range in &config.age_ranges {
        let range = range.clone();
        let name = format!("{}[{}]", COUNT_BY_AGE_RANGE, range.category);
        let scenario = Scenario::new(name, move |ctx| {
            let reporter = ctx.steps.reporter();
            reporter.step(&format!("Analyzing age category: {}", range.category));
            let count = ctx
                .steps
                .count_between(ctx.people, range.min_age, range.max_age);
            reporter.attach(
                "Category Analysis",
                TEXT_PLAIN,
                &format!(
                    "Category: {}\nAge Range: {}-{}\nCount: {}",
                    range.category, range.min_age, range.max_age, count
                ),
            );
            Ok(())
        })
        .describe("Verify people count in different age ranges")
        .in_groups(&["regression"]);
        suite.add(gated(config, scenario));
    }

    suite
}

fn gated(config: &SuiteConfig, scenario: Scenario) -> Scenario {
    if config.is_disabled(&scenario.name) {
        scenario.disabled()
    } else {
        scenario
    }
}
