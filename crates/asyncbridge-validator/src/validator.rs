//! Two-phase document validation.

use crate::cache::{ValidationCache, content_key};
use crate::issue::{IssueKind, ValidationIssue, ValidationMetrics, ValidationResult};
use crate::semantic::check_semantics;
use crate::structural::check_structure;
use asyncbridge_core::AsyncApiDocument;
use rayon::prelude::*;
use serde_json::Value;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Validates AsyncAPI 3.0 documents
///
/// Phase one checks the document against the embedded structural schema.
/// Phase two applies referential and semantic rules. Both phases feed one
/// result; a document is valid when neither reports an error.
#[derive(Debug, Default)]
pub struct DocumentValidator {
    cache: Option<ValidationCache>,
}

impl DocumentValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve repeated validations of identical content from a cache
    pub fn with_cache() -> Self {
        Self {
            cache: Some(ValidationCache::new()),
        }
    }

    /// Like [`DocumentValidator::with_cache`], keeping at most `capacity` results
    pub fn with_cache_capacity(capacity: usize) -> Self {
        Self {
            cache: Some(ValidationCache::with_capacity(capacity)),
        }
    }

    pub fn cache(&self) -> Option<&ValidationCache> {
        self.cache.as_ref()
    }

    /// Validate a document given as a JSON value
    pub fn validate(&self, document: &Value) -> ValidationResult {
        let start = Instant::now();

        let Some(cache) = &self.cache else {
            return self.run(document, start);
        };
        let key = match serde_json::to_vec(document) {
            Ok(bytes) => content_key(&bytes),
            Err(err) => {
                warn!(error = %err, "document could not be hashed; validating uncached");
                return self.run(document, start);
            }
        };

        let (mut result, hit) = cache.get_or_validate(&key, || self.run(document, start));
        if hit {
            debug!(key = %key, "validation served from cache");
            result.metrics.cache_hit = true;
            result.metrics.duration = start.elapsed();
        }
        result
    }

    /// Validate an assembled document
    pub fn validate_document(&self, document: &AsyncApiDocument) -> ValidationResult {
        match serde_json::to_value(document) {
            Ok(value) => self.validate(&value),
            Err(err) => ValidationResult::failure(ValidationIssue::new(
                IssueKind::ParseError,
                "",
                format!("document could not be serialized: {err}"),
            )),
        }
    }

    /// Validate JSON or YAML text
    pub fn validate_str(&self, text: &str) -> ValidationResult {
        match parse_document(text) {
            Ok(value) => self.validate(&value),
            Err(message) => {
                warn!(error = %message, "document could not be parsed");
                ValidationResult::failure(ValidationIssue::new(IssueKind::ParseError, "", message))
            }
        }
    }

    /// Read and validate a JSON or YAML file
    pub fn validate_file(&self, path: impl AsRef<Path>) -> ValidationResult {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => self.validate_str(&text),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "document could not be read");
                ValidationResult::failure(ValidationIssue::new(
                    IssueKind::FileError,
                    "",
                    format!("failed to read {}: {err}", path.display()),
                ))
            }
        }
    }

    /// Validate independent documents in parallel, preserving input order
    pub fn validate_batch(&self, documents: &[Value]) -> Vec<ValidationResult> {
        documents.par_iter().map(|document| self.validate(document)).collect()
    }

    /// Validate independent files in parallel, preserving input order
    pub fn validate_files<P>(&self, paths: &[P]) -> Vec<ValidationResult>
    where
        P: AsRef<Path> + Sync,
    {
        paths.par_iter().map(|path| self.validate_file(path)).collect()
    }

    fn run(&self, document: &Value, start: Instant) -> ValidationResult {
        let mut errors = check_structure(document);
        let semantic = check_semantics(document);
        errors.extend(semantic.errors);

        let metrics = ValidationMetrics {
            duration: start.elapsed(),
            channel_count: count(document.get("channels")),
            operation_count: count(document.get("operations")),
            schema_count: count(document.get("components").and_then(|c| c.get("schemas"))),
            cache_hit: false,
        };
        let result = ValidationResult::from_issues(errors, semantic.warnings, metrics);

        info!(
            valid = result.valid,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            channels = metrics.channel_count,
            operations = metrics.operation_count,
            duration_us = metrics.duration.as_micros() as u64,
            "validation finished"
        );
        result
    }
}

/// Parse JSON, falling back to YAML for anything that is not a JSON object
fn parse_document(text: &str) -> Result<Value, String> {
    if text.trim_start().starts_with('{') {
        return serde_json::from_str(text).map_err(|err| format!("invalid JSON: {err}"));
    }
    match serde_yaml::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(Value::Object(map)),
        Ok(_) => Err("document is not a mapping".to_string()),
        Err(err) => Err(format!("invalid YAML: {err}")),
    }
}

fn count(section: Option<&Value>) -> usize {
    section.and_then(Value::as_object).map_or(0, |map| map.len())
}
