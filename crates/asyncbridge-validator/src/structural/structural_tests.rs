#![allow(non_snake_case)]

use super::*;
use serde_json::json;
use test_case::test_case;

fn minimal() -> Value {
    json!({
        "asyncapi": "3.0.0",
        "info": { "title": "Orders", "version": "1.0.0" }
    })
}

fn kinds(issues: &[ValidationIssue]) -> Vec<IssueKind> {
    issues.iter().map(|issue| issue.kind).collect()
}

#[test]
fn ASYNCAPI_SCHEMA___parses_as_json() {
    let schema: Value = serde_json::from_str(ASYNCAPI_SCHEMA).unwrap();

    assert_eq!(schema["properties"]["asyncapi"]["const"], "3.0.0");
}

#[test]
fn check_structure___minimal_document___no_issues() {
    assert!(check_structure(&minimal()).is_empty());
}

#[test]
fn check_structure___extension_keys___allowed_at_root() {
    let mut document = minimal();
    document["x-generated-from-source"] = json!({ "generator": "asyncbridge" });

    assert!(check_structure(&document).is_empty());
}

#[test]
fn check_structure___missing_asyncapi___required_field_with_path() {
    let mut document = minimal();
    document.as_object_mut().unwrap().remove("asyncapi");

    let issues = check_structure(&document);

    assert_eq!(kinds(&issues), [IssueKind::RequiredField]);
    assert_eq!(issues[0].path, "/asyncapi");
    assert!(issues[0].message.contains("asyncapi"));
}

#[test]
fn check_structure___missing_info_title___required_field() {
    let document = json!({ "asyncapi": "3.0.0", "info": { "version": "1.0.0" } });

    let issues = check_structure(&document);

    assert_eq!(kinds(&issues), [IssueKind::RequiredField]);
    assert_eq!(issues[0].path, "/info/title");
}

#[test_case(json!("2.6.0"), IssueKind::InvalidValue ; "wrong version constant")]
#[test_case(json!(3), IssueKind::InvalidType ; "version is not a string")]
fn check_structure___bad_asyncapi_field(version: Value, expected: IssueKind) {
    let mut document = minimal();
    document["asyncapi"] = version;

    let issues = check_structure(&document);

    assert!(issues.iter().any(|issue| issue.kind == expected && issue.path == "/asyncapi"));
}

#[test]
fn check_structure___unknown_action___invalid_value() {
    let mut document = minimal();
    document["channels"] = json!({ "c": { "address": "/c" } });
    document["operations"] = json!({
        "op": { "action": "publish", "channel": { "$ref": "#/channels/c" } }
    });

    let issues = check_structure(&document);

    assert_eq!(kinds(&issues), [IssueKind::InvalidValue]);
    assert_eq!(issues[0].path, "/operations/op/action");
}

#[test]
fn check_structure___server_without_host___required_field() {
    let mut document = minimal();
    document["servers"] = json!({ "prod": { "protocol": "kafka" } });

    let issues = check_structure(&document);

    assert_eq!(kinds(&issues), [IssueKind::RequiredField]);
    assert_eq!(issues[0].path, "/servers/prod/host");
}

#[test]
fn check_structure___unknown_root_key___schema_violation() {
    let mut document = minimal();
    document["paths"] = json!({});

    let issues = check_structure(&document);

    assert_eq!(kinds(&issues), [IssueKind::SchemaViolation]);
}

#[test]
fn escape_pointer___escapes_tilde_and_slash() {
    assert_eq!(escape_pointer("a/b~c"), "a~1b~0c");
}
