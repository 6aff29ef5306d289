//! Aggregation steps over person lists.
//!
//! Every step computes its value from the input slice without mutating it,
//! and reports what it did through the [`Reporter`]. Reporting never affects
//! the returned value. Verification steps fail with
//! [`StatsError::AssertionFailed`].

use tracing::debug;

use crate::domain::{AgeDistribution, AggregateReport, Person, Result, StatsError};
use crate::reporter::{Reporter, TEXT_PLAIN};
use crate::source::RecordSource;

/// Reporting statistics steps.
#[derive(Debug, Clone)]
pub struct PeopleSteps {
    reporter: Reporter,
}

impl PeopleSteps {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Load every source in order and concatenate the results.
    pub fn load_all(&self, sources: &[&dyn RecordSource]) -> Result<Vec<Person>> {
        let mut all = Vec::new();
        for source in sources {
            let people = source.load()?;
            self.reporter.step(&format!(
                "Loaded {} people from {}",
                people.len(),
                source.label()
            ));
            all.extend(people);
        }
        self.reporter
            .step(&format!("Total people loaded: {}", all.len()));
        Ok(all)
    }

    /// Mean age; `0.0` for an empty list.
    pub fn average(&self, people: &[Person]) -> f64 {
        let average = if people.is_empty() {
            0.0
        } else {
            people.iter().map(|p| f64::from(p.age)).sum::<f64>() / people.len() as f64
        };

        let report = AggregateReport::average(average);
        self.reporter.attach(&report.title, TEXT_PLAIN, &report.text);
        average
    }

    /// Fail unless `min <= value <= max`.
    pub fn verify_in_range(&self, value: f64, min: f64, max: f64) -> Result<()> {
        debug!(value, min, max, "verify in range");
        if value < min || value > max {
            return Err(StatsError::assertion(format!(
                "Value {:.2} should be between {:.2} and {:.2}",
                value, min, max
            )));
        }
        Ok(())
    }

    /// Oldest person; the first one wins on ties.
    pub fn find_oldest<'a>(&self, people: &'a [Person]) -> Option<&'a Person> {
        let oldest = people
            .iter()
            .reduce(|best, p| if p.age > best.age { p } else { best });

        if let Some(p) = oldest {
            self.reporter
                .step(&format!("Found oldest: {}, age {}", p.display_name(), p.age));
        }
        oldest
    }

    /// Youngest person; the first one wins on ties.
    pub fn find_youngest<'a>(&self, people: &'a [Person]) -> Option<&'a Person> {
        let youngest = people
            .iter()
            .reduce(|best, p| if p.age < best.age { p } else { best });

        if let Some(p) = youngest {
            self.reporter
                .step(&format!("Found youngest: {}, age {}", p.display_name(), p.age));
        }
        youngest
    }

    /// Fail when the person is missing, unnamed, not positively aged, or has no email.
    pub fn verify_valid(&self, person: Option<&Person>) -> Result<()> {
        let person = person.ok_or_else(|| StatsError::assertion("Person should not be null"))?;

        if person.name.is_none() {
            return Err(StatsError::assertion("Person name should not be null"));
        }
        if person.age <= 0 {
            return Err(StatsError::assertion("Person age should be positive"));
        }
        if person.email.is_none() {
            return Err(StatsError::assertion("Person email should not be null"));
        }
        Ok(())
    }

    /// Attach a `Name:/Age:/Email:` block under `title`.
    pub fn attach_details(&self, person: &Person, title: &str) {
        let details = format!(
            "Name: {}\nAge: {}\nEmail: {}\n",
            person.name().unwrap_or(""),
            person.age,
            person.email().unwrap_or("")
        );
        self.reporter.attach(title, TEXT_PLAIN, &details);
    }

    /// People strictly younger than `max_age`.
    pub fn count_under(&self, people: &[Person], max_age: i32) -> usize {
        let count = people.iter().filter(|p| p.age < max_age).count();
        self.reporter
            .step(&format!("Found {} people under {}", count, max_age));
        count
    }

    /// People with `min_age <= age < max_age`.
    pub fn count_between(&self, people: &[Person], min_age: i32, max_age: i32) -> usize {
        let count = people
            .iter()
            .filter(|p| p.age >= min_age && p.age < max_age)
            .count();
        self.reporter.step(&format!(
            "Found {} people between {} and {}",
            count, min_age, max_age
        ));
        count
    }

    /// People aged `min_age` or more.
    pub fn count_over(&self, people: &[Person], min_age: i32) -> usize {
        let count = people.iter().filter(|p| p.age >= min_age).count();
        self.reporter
            .step(&format!("Found {} people over {}", count, min_age));
        count
    }

    /// Attach the distribution block for counts split at 30 and 60.
    pub fn attach_distribution_report(
        &self,
        under30: usize,
        between30_and_60: usize,
        over60: usize,
    ) -> AggregateReport {
        self.attach_distribution(AgeDistribution::new(under30, between30_and_60, over60))
    }

    pub fn attach_distribution(&self, distribution: AgeDistribution) -> AggregateReport {
        let report = AggregateReport::distribution(distribution);
        self.reporter.attach(&report.title, TEXT_PLAIN, &report.text);
        report
    }

    /// Count all three buckets at the given cut points and attach the report.
    pub fn distribution(
        &self,
        people: &[Person],
        young_below: i32,
        senior_from: i32,
    ) -> AggregateReport {
        let under = self.count_under(people, young_below);
        let between = self.count_between(people, young_below, senior_from);
        let over = self.count_over(people, senior_from);
        self.attach_distribution(AgeDistribution::with_cut_points(
            under,
            between,
            over,
            young_below,
            senior_from,
        ))
    }

    /// Fail at the first person whose email is missing or lacks `@` or `.`.
    pub fn verify_all_emails_valid(&self, people: &[Person]) -> Result<()> {
        for person in people {
            let name = person.display_name();
            let email = person.email().ok_or_else(|| {
                StatsError::assertion(format!("Email should not be null for: {}", name))
            })?;
            if !email.contains('@') {
                return Err(StatsError::assertion(format!(
                    "Email should contain @ for: {}",
                    name
                )));
            }
            if !email.contains('.') {
                return Err(StatsError::assertion(format!(
                    "Email should contain . for: {}",
                    name
                )));
            }
        }
        self.reporter
            .step(&format!("All {} emails are valid", people.len()));
        Ok(())
    }
}
