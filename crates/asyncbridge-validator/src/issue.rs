//! Validation issues and results.

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// What kind of problem a [`ValidationIssue`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueKind {
    /// A required key is missing
    RequiredField,
    /// A value is outside its allowed set (enum, const, binding version)
    InvalidValue,
    /// A value has the wrong JSON type
    InvalidType,
    /// Any other structural schema violation
    SchemaViolation,
    /// A local `$ref` that does not resolve, or resolves to the wrong place
    UnresolvedReference,
    /// A component schema that nothing references
    UnusedComponent,
    /// A channel without messages
    EmptyChannel,
    /// The input could not be parsed as JSON or YAML
    ParseError,
    /// The input file could not be read
    FileError,
}

impl IssueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::RequiredField => "required-field",
            IssueKind::InvalidValue => "invalid-value",
            IssueKind::InvalidType => "invalid-type",
            IssueKind::SchemaViolation => "schema-violation",
            IssueKind::UnresolvedReference => "unresolved-reference",
            IssueKind::UnusedComponent => "unused-component",
            IssueKind::EmptyChannel => "empty-channel",
            IssueKind::ParseError => "parse-error",
            IssueKind::FileError => "file-error",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub kind: IssueKind,

    /// JSON pointer to the offending value (`""` for the document root)
    pub path: String,

    pub message: String,
}

impl ValidationIssue {
    pub fn new(kind: IssueKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}] {}", self.kind, self.message)
        } else {
            write!(f, "[{}] {}: {}", self.kind, self.path, self.message)
        }
    }
}

/// Observability data gathered during one validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationMetrics {
    pub duration: Duration,
    pub channel_count: usize,
    pub operation_count: usize,
    pub schema_count: usize,

    /// Whether the result was served from the cache
    pub cache_hit: bool,
}

/// Outcome of validating one document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// `true` iff `errors` is empty
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub metrics: ValidationMetrics,
}

impl ValidationResult {
    pub(crate) fn from_issues(
        errors: Vec<ValidationIssue>,
        warnings: Vec<ValidationIssue>,
        metrics: ValidationMetrics,
    ) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
            metrics,
        }
    }

    /// A failed result carrying a single error
    pub fn failure(issue: ValidationIssue) -> Self {
        Self::from_issues(vec![issue], Vec::new(), ValidationMetrics::default())
    }

    /// True if any error has the given kind
    pub fn has_error(&self, kind: IssueKind) -> bool {
        self.errors.iter().any(|issue| issue.kind == kind)
    }

    /// True if any warning has the given kind
    pub fn has_warning(&self, kind: IssueKind) -> bool {
        self.warnings.iter().any(|issue| issue.kind == kind)
    }
}
