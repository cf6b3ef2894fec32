#![allow(non_snake_case)]

use super::*;
use serde_json::json;

fn config(value: Value) -> BindingConfig {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn BindingReport___warnings_only___is_valid() {
    let mut report = BindingReport::new();

    report.warning("high partition count");

    assert!(report.is_valid());
}

#[test]
fn check_one_of___absent_field___no_error() {
    let mut report = BindingReport::new();

    check_one_of(&mut report, &Map::new(), "method", &["GET"]);

    assert!(report.is_valid());
}

#[test]
fn check_one_of___non_string___error() {
    let mut report = BindingReport::new();

    check_one_of(&mut report, &config(json!({ "method": 1 })), "method", &["GET"]);

    assert_eq!(report.errors, vec!["method must be one of GET, got 1".to_string()]);
}

#[test]
fn check_positive_integer___above_threshold___warns() {
    let mut report = BindingReport::new();

    check_positive_integer(&mut report, &config(json!({ "n": 11 })), "n", 10);

    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn check_positive_integer___negative___error_mentions_positive_integer() {
    let mut report = BindingReport::new();

    check_positive_integer(&mut report, &config(json!({ "n": -1 })), "n", 10);

    assert_eq!(report.errors, vec!["n must be a positive integer, got -1".to_string()]);
}

#[test]
fn check_schema_object___untyped_object___accepted() {
    let mut report = BindingReport::new();

    check_schema_object(
        &mut report,
        &config(json!({ "query": { "properties": {} } })),
        "query",
        true,
    );

    assert!(report.is_valid());
}

#[test]
fn BindingLevel___display___lowercase() {
    let names: Vec<_> = BindingLevel::ALL.iter().map(|l| l.to_string()).collect();

    assert_eq!(names, vec!["server", "channel", "operation", "message"]);
}
