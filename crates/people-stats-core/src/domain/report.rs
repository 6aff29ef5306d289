//! Aggregate values and their human-readable renderings.

use serde::{Deserialize, Serialize};

const HEAVY_RULE: &str = "═══════════════════════════════════";
const LIGHT_RULE: &str = "───────────────────────────────────";

/// Counts of people per age bucket, split at two cut points.
///
/// Buckets are `age < young_below`, `young_below <= age < senior_from` and
/// `age >= senior_from`, so every age lands in exactly one bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeDistribution {
    pub under: usize,
    pub between: usize,
    pub over: usize,
    pub young_below: i32,
    pub senior_from: i32,
}

impl AgeDistribution {
    pub const DEFAULT_YOUNG_BELOW: i32 = 30;
    pub const DEFAULT_SENIOR_FROM: i32 = 60;

    /// Distribution with the default 30/60 cut points.
    pub fn new(under: usize, between: usize, over: usize) -> Self {
        Self::with_cut_points(
            under,
            between,
            over,
            Self::DEFAULT_YOUNG_BELOW,
            Self::DEFAULT_SENIOR_FROM,
        )
    }

    pub fn with_cut_points(
        under: usize,
        between: usize,
        over: usize,
        young_below: i32,
        senior_from: i32,
    ) -> Self {
        Self {
            under,
            between,
            over,
            young_below,
            senior_from,
        }
    }

    pub fn total(&self) -> usize {
        self.under + self.between + self.over
    }

    /// Share of `count` in the total, in percent. Zero when the total is zero.
    pub fn percentage(&self, count: usize) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        }
    }

    /// Render the fixed-width distribution block.
    pub fn render(&self) -> String {
        let rows = [
            (format!("Under {}:", self.young_below), self.under),
            (format!("{}-{}:", self.young_below, self.senior_from), self.between),
            (format!("Over {}:", self.senior_from), self.over),
        ];

        let mut out = String::new();
        out.push_str(HEAVY_RULE);
        out.push_str("\nAge Distribution Report\n");
        out.push_str(HEAVY_RULE);
        out.push('\n');
        for (label, count) in &rows {
            out.push_str(&format!(
                "{:<13}{:>3}  ({:.1}%)\n",
                label,
                count,
                self.percentage(*count)
            ));
        }
        out.push_str(LIGHT_RULE);
        out.push('\n');
        let total_share = if self.total() == 0 { 0 } else { 100 };
        out.push_str(&format!(
            "{:<13}{:>3}  ({}%)\n",
            "Total:",
            self.total(),
            total_share
        ));
        out.push_str(HEAVY_RULE);
        out.push('\n');
        out
    }
}

/// The computed value behind an [`AggregateReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregateValue {
    Average { value: f64 },
    Distribution(AgeDistribution),
}

/// A computed statistic together with the text attached to the report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregateReport {
    pub title: String,
    pub value: AggregateValue,
    pub text: String,
}

impl AggregateReport {
    pub fn average(value: f64) -> Self {
        Self {
            title: "Average Age".to_string(),
            value: AggregateValue::Average { value },
            text: format!("{:.2} years", value),
        }
    }

    pub fn distribution(distribution: AgeDistribution) -> Self {
        Self {
            title: "Age Distribution".to_string(),
            text: distribution.render(),
            value: AggregateValue::Distribution(distribution),
        }
    }
}
