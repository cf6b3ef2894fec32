//! Referential and semantic checks the structural schema cannot express.

use crate::issue::{IssueKind, ValidationIssue};
use crate::structural::escape_pointer;
use asyncbridge_core::document::{
    HTTP_BINDING_VERSION, KAFKA_BINDING_VERSION, WEBSOCKET_BINDING_VERSION,
};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Errors and warnings from the semantic phase
#[derive(Debug, Default)]
pub(crate) struct SemanticReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl SemanticReport {
    fn error(&mut self, kind: IssueKind, path: String, message: String) {
        self.errors.push(ValidationIssue::new(kind, path, message));
    }

    fn warning(&mut self, kind: IssueKind, path: String, message: String) {
        self.warnings.push(ValidationIssue::new(kind, path, message));
    }
}

/// Run every semantic rule over a document
pub(crate) fn check_semantics(document: &Value) -> SemanticReport {
    let mut report = SemanticReport::default();

    let mut references = Vec::new();
    collect_references(document, String::new(), &mut references);

    let misplaced = check_reference_targets(document, &mut report);
    for (path, reference) in &references {
        if misplaced.contains(path) {
            continue;
        }
        let Some(pointer) = reference.strip_prefix('#') else {
            debug!(reference = %reference, "skipping non-local reference");
            continue;
        };
        if document.pointer(pointer).is_none() {
            report.error(
                IssueKind::UnresolvedReference,
                path.clone(),
                format!("reference '{reference}' does not resolve"),
            );
        }
    }

    check_binding_versions(document, &mut report);

    let referenced: BTreeSet<&str> = references.iter().map(|(_, r)| *r).collect();
    for (name, _) in entries(document.get("components"), "schemas") {
        let reference = format!("#/components/schemas/{}", escape_pointer(name));
        if !referenced.contains(reference.as_str()) {
            report.warning(
                IssueKind::UnusedComponent,
                format!("/components/schemas/{}", escape_pointer(name)),
                format!("schema '{name}' is never referenced"),
            );
        }
    }

    for (key, channel) in entries(Some(document), "channels") {
        let empty = channel
            .get("messages")
            .and_then(Value::as_object)
            .is_none_or(|messages| messages.is_empty());
        if empty {
            report.warning(
                IssueKind::EmptyChannel,
                format!("/channels/{}", escape_pointer(key)),
                format!("channel '{key}' declares no messages"),
            );
        }
    }

    report
}

/// Check that operation and channel references point at the right kind of
/// object. Returns the paths of references reported here.
fn check_reference_targets(document: &Value, report: &mut SemanticReport) -> BTreeSet<String> {
    let mut misplaced = BTreeSet::new();

    for (name, operation) in entries(Some(document), "operations") {
        let base = format!("/operations/{}", escape_pointer(name));
        let Some(channel) = reference_of(operation.get("channel")) else {
            continue;
        };
        if !channel.starts_with("#/channels/") {
            let path = format!("{base}/channel");
            report.error(
                IssueKind::UnresolvedReference,
                path.clone(),
                format!("operation '{name}' must reference a channel, found '{channel}'"),
            );
            misplaced.insert(path);
            continue;
        }

        let prefix = format!("{channel}/messages/");
        let messages = operation.get("messages").and_then(Value::as_array);
        for (index, message) in messages.into_iter().flatten().enumerate() {
            let Some(reference) = reference_of(Some(message)) else {
                continue;
            };
            if !reference.starts_with(&prefix) {
                let path = format!("{base}/messages/{index}");
                report.error(
                    IssueKind::UnresolvedReference,
                    path.clone(),
                    format!("operation '{name}' message '{reference}' is not a message of its channel"),
                );
                misplaced.insert(path);
            }
        }
    }

    for (key, channel) in entries(Some(document), "channels") {
        for (name, message) in entries(Some(channel), "messages") {
            let Some(reference) = reference_of(Some(message)) else {
                continue;
            };
            let in_components = reference.starts_with("#/components/messages/")
                || reference.starts_with("#/components/schemas/");
            if !in_components {
                let path = format!(
                    "/channels/{}/messages/{}",
                    escape_pointer(key),
                    escape_pointer(name)
                );
                report.error(
                    IssueKind::UnresolvedReference,
                    path.clone(),
                    format!("channel '{key}' message '{name}' must reference a component, found '{reference}'"),
                );
                misplaced.insert(path);
            }
        }
    }

    misplaced
}

fn check_binding_versions(document: &Value, report: &mut SemanticReport) {
    let mut targets: Vec<(String, &Value)> = Vec::new();
    for section in ["servers", "channels", "operations"] {
        for (name, item) in entries(Some(document), section) {
            if let Some(bindings) = item.get("bindings") {
                targets.push((format!("/{section}/{}/bindings", escape_pointer(name)), bindings));
            }
        }
    }
    for (name, message) in entries(document.get("components"), "messages") {
        if let Some(bindings) = message.get("bindings") {
            targets.push((
                format!("/components/messages/{}/bindings", escape_pointer(name)),
                bindings,
            ));
        }
    }

    for (path, bindings) in targets {
        for (key, binding) in bindings.as_object().into_iter().flatten() {
            let expected = match key.as_str() {
                "kafka" => KAFKA_BINDING_VERSION,
                "ws" => WEBSOCKET_BINDING_VERSION,
                "http" => HTTP_BINDING_VERSION,
                _ => continue,
            };
            let Some(version) = binding.get("bindingVersion") else {
                continue;
            };
            if version.as_str() != Some(expected) {
                report.error(
                    IssueKind::InvalidValue,
                    format!("{path}/{key}/bindingVersion"),
                    format!("{key} binding version {version} is not supported; expected \"{expected}\""),
                );
            }
        }
    }
}

fn collect_references<'a>(value: &'a Value, path: String, out: &mut Vec<(String, &'a str)>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("$ref") {
                out.push((path.clone(), reference.as_str()));
            }
            for (key, child) in map {
                if key != "$ref" {
                    collect_references(child, format!("{path}/{}", escape_pointer(key)), out);
                }
            }
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect_references(item, format!("{path}/{index}"), out);
            }
        }
        _ => {}
    }
}

fn reference_of(value: Option<&Value>) -> Option<&str> {
    value?.get("$ref")?.as_str()
}

fn entries<'a>(
    parent: Option<&'a Value>,
    key: &str,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    parent
        .and_then(|p| p.get(key))
        .and_then(Value::as_object)
        .into_iter()
        .flatten()
}
