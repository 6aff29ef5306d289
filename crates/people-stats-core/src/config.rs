//! Suite configuration.
//!
//! Loaded from TOML; every field has a default so a partial file (or no
//! file at all) is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AgeDistribution, Result, StatsError};
use crate::source::{CsvSource, YamlSource};

/// Inclusive bounds for the average-age check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AverageBounds {
    pub min: f64,
    pub max: f64,
}

impl Default for AverageBounds {
    fn default() -> Self {
        Self {
            min: 20.0,
            max: 100.0,
        }
    }
}

/// Cut points for the three-bucket distribution report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CutPoints {
    pub young_below: i32,
    pub senior_from: i32,
}

impl Default for CutPoints {
    fn default() -> Self {
        Self {
            young_below: AgeDistribution::DEFAULT_YOUNG_BELOW,
            senior_from: AgeDistribution::DEFAULT_SENIOR_FROM,
        }
    }
}

/// One row of the age-range table: `min_age <= age < max_age`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AgeRange {
    pub min_age: i32,
    pub max_age: i32,
    pub category: String,
}

impl AgeRange {
    pub fn new(min_age: i32, max_age: i32, category: impl Into<String>) -> Self {
        Self {
            min_age,
            max_age,
            category: category.into(),
        }
    }
}

fn default_age_ranges() -> Vec<AgeRange> {
    vec![
        AgeRange::new(0, 30, "Young"),
        AgeRange::new(30, 60, "Middle-aged"),
        AgeRange::new(60, 150, "Senior"),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuiteConfig {
    pub suite_name: String,
    pub csv_path: PathBuf,
    pub yaml_path: PathBuf,
    pub average_bounds: AverageBounds,
    pub distribution: CutPoints,
    pub age_ranges: Vec<AgeRange>,
    /// Groups to run; empty runs everything.
    pub groups: Vec<String>,
    /// Scenario names reported as skipped without running.
    pub disabled: Vec<String>,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            suite_name: "People Statistics".to_string(),
            csv_path: PathBuf::from("fixtures/people.csv"),
            yaml_path: PathBuf::from("fixtures/people.yaml"),
            average_bounds: AverageBounds::default(),
            distribution: CutPoints::default(),
            age_ranges: default_age_ranges(),
            groups: Vec::new(),
            disabled: Vec::new(),
        }
    }
}

impl SuiteConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: SuiteConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.suite_name.trim().is_empty() {
            return Err(StatsError::InvalidConfig(
                "suite_name must not be empty".to_string(),
            ));
        }
        if self.average_bounds.min > self.average_bounds.max {
            return Err(StatsError::InvalidConfig(format!(
                "average_bounds.min ({}) exceeds max ({})",
                self.average_bounds.min, self.average_bounds.max
            )));
        }
        if self.distribution.young_below > self.distribution.senior_from {
            return Err(StatsError::InvalidConfig(format!(
                "distribution.young_below ({}) exceeds senior_from ({})",
                self.distribution.young_below, self.distribution.senior_from
            )));
        }
        if let Some(r) = self.age_ranges.iter().find(|r| r.min_age > r.max_age) {
            return Err(StatsError::InvalidConfig(format!(
                "age range {} has min_age {} above max_age {}",
                r.category, r.min_age, r.max_age
            )));
        }
        Ok(())
    }

    pub fn csv_source(&self) -> CsvSource {
        CsvSource::new(&self.csv_path)
    }

    pub fn yaml_source(&self) -> YamlSource {
        YamlSource::new(&self.yaml_path)
    }

    pub fn is_disabled(&self, scenario: &str) -> bool {
        self.disabled.iter().any(|d| d == scenario)
    }
}
