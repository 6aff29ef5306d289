//! Record sources: CSV and YAML fixture readers.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{Person, SourceError};

/// Something that yields an ordered list of people.
pub trait RecordSource {
    /// Short label used in report lines, e.g. `CSV`.
    fn label(&self) -> &str;

    fn load(&self) -> Result<Vec<Person>, SourceError>;
}

fn read_file(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// CSV file with a `name,age,email` header row.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse CSV text; `origin` is only used for error messages.
    pub fn parse(content: &str, origin: &Path) -> Result<Vec<Person>, SourceError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        reader
            .deserialize::<Person>()
            .map(|row| {
                row.map_err(|source| SourceError::Csv {
                    path: origin.to_path_buf(),
                    source,
                })
            })
            .collect()
    }
}

impl RecordSource for CsvSource {
    fn label(&self) -> &str {
        "CSV"
    }

    fn load(&self) -> Result<Vec<Person>, SourceError> {
        let content = read_file(&self.path)?;
        let people = Self::parse(&content, &self.path)?;
        debug!(path = %self.path.display(), count = people.len(), "parsed CSV fixture");
        Ok(people)
    }
}

/// Accepted YAML layouts: a bare sequence or a `people:` key, which may be
/// left empty.
#[derive(Deserialize)]
#[serde(untagged)]
enum PeopleDocument {
    List(Vec<Person>),
    Keyed {
        #[serde(default)]
        people: Option<Vec<Person>>,
    },
}

/// YAML file listing people by key.
#[derive(Debug, Clone)]
pub struct YamlSource {
    path: PathBuf,
}

impl YamlSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse(content: &str, origin: &Path) -> Result<Vec<Person>, SourceError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        // A document holding only comments deserializes as `None`.
        let doc: Option<PeopleDocument> =
            serde_yaml::from_str(content).map_err(|source| SourceError::Yaml {
                path: origin.to_path_buf(),
                source,
            })?;

        Ok(match doc {
            None => Vec::new(),
            Some(PeopleDocument::List(people)) => people,
            Some(PeopleDocument::Keyed { people }) => people.unwrap_or_default(),
        })
    }
}

impl RecordSource for YamlSource {
    fn label(&self) -> &str {
        "YAML"
    }

    fn load(&self) -> Result<Vec<Person>, SourceError> {
        let content = read_file(&self.path)?;
        let people = Self::parse(&content, &self.path)?;
        debug!(path = %self.path.display(), count = people.len(), "parsed YAML fixture");
        Ok(people)
    }
}

/// Fixed in-memory source, handy for scenarios that build their own data.
#[derive(Debug, Clone)]
pub struct StaticSource {
    label: String,
    people: Vec<Person>,
}

impl StaticSource {
    pub fn new(label: impl Into<String>, people: Vec<Person>) -> Self {
        Self {
            label: label.into(),
            people,
        }
    }
}

impl RecordSource for StaticSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn load(&self) -> Result<Vec<Person>, SourceError> {
        Ok(self.people.clone())
    }
}
