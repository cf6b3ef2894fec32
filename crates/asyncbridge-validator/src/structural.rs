//! Structural checks against the embedded AsyncAPI 3.0 schema.

use crate::issue::{IssueKind, ValidationIssue};
use jsonschema::Validator;
use jsonschema::error::{ValidationError, ValidationErrorKind};
use once_cell::sync::Lazy;
use serde_json::Value;

/// Structural subset of the AsyncAPI 3.0.0 JSON schema
pub const ASYNCAPI_SCHEMA: &str = include_str!("../schema/asyncapi-3.0.json");

#[allow(clippy::expect_used)] // Safe: the embedded schema is a fixed, tested asset
static STRUCTURAL: Lazy<Validator> = Lazy::new(|| {
    let schema: Value = serde_json::from_str(ASYNCAPI_SCHEMA).expect("embedded schema is valid JSON");
    jsonschema::validator_for(&schema).expect("embedded schema compiles")
});

/// Run the structural schema over a document
pub(crate) fn check_structure(document: &Value) -> Vec<ValidationIssue> {
    STRUCTURAL
        .iter_errors(document)
        .map(|error| to_issue(&error))
        .collect()
}

fn to_issue(error: &ValidationError<'_>) -> ValidationIssue {
    let path = error.instance_path.to_string();
    let message = error.to_string();
    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property.as_str().map_or_else(|| property.to_string(), str::to_string);
            ValidationIssue::new(
                IssueKind::RequiredField,
                format!("{path}/{}", escape_pointer(&name)),
                format!("missing required field '{name}'"),
            )
        }
        ValidationErrorKind::Constant { .. } | ValidationErrorKind::Enum { .. } => {
            ValidationIssue::new(IssueKind::InvalidValue, path, message)
        }
        ValidationErrorKind::Type { .. } => ValidationIssue::new(IssueKind::InvalidType, path, message),
        _ => ValidationIssue::new(IssueKind::SchemaViolation, path, message),
    }
}

/// Escape one JSON pointer segment
pub(crate) fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

#[cfg(test)]
#[path = "structural/structural_tests.rs"]
mod structural_tests;
