//! Person records loaded from fixture files.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single person record.
///
/// Fixture data may leave `name` or `email` blank; those fields are kept as
/// `None` so verification steps can report the gap instead of the loader
/// rejecting the whole file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Person {
    #[serde(default)]
    pub name: Option<String>,

    pub age: i32,

    #[serde(default)]
    pub email: Option<String>,
}

impl Person {
    /// Create a fully populated person.
    pub fn new(name: impl Into<String>, age: i32, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            age,
            email: Some(email.into()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Name for messages; blank names render as `<unnamed>`.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or("<unnamed>")
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.display_name(),
            self.age,
            self.email().unwrap_or("<no email>")
        )
    }
}
