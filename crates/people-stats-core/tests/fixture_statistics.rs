//! End-to-end statistics over CSV and YAML fixture files.

use std::io::Write;
use std::sync::Arc;

use people_stats_core::reporter::fakes::MemorySink;
use people_stats_core::{
    CsvSource, PeopleSteps, Person, RecordSource, Reporter, SourceError, StatsError, YamlSource,
};
use tempfile::NamedTempFile;

fn write_fixture(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp fixture");
    file.write_all(content.as_bytes()).expect("write fixture");
    file
}

fn steps() -> (PeopleSteps, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    (PeopleSteps::new(Reporter::new(sink.clone())), sink)
}

#[test]
fn test_combined_fixture_statistics() {
    let csv = write_fixture(
        ".csv",
        "name,age,email\nAlice,25,a@x.com\nBob,65,b@x.com\n",
    );
    let yaml = write_fixture(".yaml", "- name: Carol\n  age: 40\n  email: c@x.com\n");

    let (steps, sink) = steps();
    let csv_source = CsvSource::new(csv.path());
    let yaml_source = YamlSource::new(yaml.path());
    let people = steps
        .load_all(&[&csv_source, &yaml_source])
        .expect("load fixtures");

    assert_eq!(
        people,
        vec![
            Person::new("Alice", 25, "a@x.com"),
            Person::new("Bob", 65, "b@x.com"),
            Person::new("Carol", 40, "c@x.com"),
        ]
    );

    let average = steps.average(&people);
    assert_eq!(format!("{:.2}", average), "43.33");
    steps.verify_in_range(average, 20.0, 100.0).expect("in range");

    assert_eq!(steps.find_oldest(&people).and_then(|p| p.name()), Some("Bob"));
    assert_eq!(
        steps.find_youngest(&people).and_then(|p| p.name()),
        Some("Alice")
    );
    assert_eq!(steps.count_under(&people, 30), 1);
    assert_eq!(steps.count_between(&people, 30, 60), 1);
    assert_eq!(steps.count_over(&people, 60), 1);
    steps.verify_all_emails_valid(&people).expect("emails valid");

    let steps_logged = sink.steps();
    assert_eq!(steps_logged[0], "Loaded 2 people from CSV");
    assert_eq!(steps_logged[1], "Loaded 1 people from YAML");
    assert_eq!(steps_logged[2], "Total people loaded: 3");
    assert_eq!(steps_logged.last().map(String::as_str), Some("All 3 emails are valid"));
}

#[test]
fn test_missing_fixture_propagates_source_error() {
    let (steps, sink) = steps();
    let csv = CsvSource::new("/nonexistent/people.csv");
    let err = steps.load_all(&[&csv]).unwrap_err();

    assert!(matches!(err, StatsError::Source(SourceError::Io { .. })));
    assert!(!err.is_assertion());
    assert!(sink.steps().is_empty());
}

#[test]
fn test_blank_email_in_csv_fails_validation() {
    let csv = write_fixture(".csv", "name,age,email\nDana,31,\n");
    let people = CsvSource::new(csv.path()).load().expect("load");

    let (steps, _) = steps();
    let err = steps.verify_all_emails_valid(&people).unwrap_err();
    assert!(err.is_assertion());
    assert!(err.to_string().contains("Email should not be null for: Dana"));
}
