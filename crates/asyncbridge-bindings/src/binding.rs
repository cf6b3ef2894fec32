//! Binding levels, validation reports and the per-protocol binding trait

use crate::Protocol;
use asyncbridge_core::state::BindingConfig;
use serde_json::{Map, Value};

/// Document object a binding is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingLevel {
    Server,
    Channel,
    Operation,
    Message,
}

impl BindingLevel {
    pub const ALL: [BindingLevel; 4] = [
        BindingLevel::Server,
        BindingLevel::Channel,
        BindingLevel::Operation,
        BindingLevel::Message,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BindingLevel::Server => "server",
            BindingLevel::Channel => "channel",
            BindingLevel::Operation => "operation",
            BindingLevel::Message => "message",
        }
    }
}

impl std::fmt::Display for BindingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of validating one binding configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl BindingReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// No errors; warnings do not count.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Builder and rule table for one protocol's bindings.
pub trait ProtocolBinding: Send + Sync {
    fn protocol(&self) -> Protocol;

    /// `bindingVersion` stamped on every built binding
    fn version(&self) -> &'static str;

    /// Fields this protocol accepts at `level`
    fn supported_fields(&self, level: BindingLevel) -> &'static [&'static str];

    /// Protocol-specific rules for the fields at `level`
    fn check(&self, level: BindingLevel, config: &BindingConfig, report: &mut BindingReport);

    /// Validate a configuration: unknown fields are warnings, rule
    /// violations are errors.
    fn validate(&self, level: BindingLevel, config: &BindingConfig) -> BindingReport {
        let mut report = BindingReport::new();
        let supported = self.supported_fields(level);
        for field in config.keys() {
            if field != "bindingVersion" && !supported.contains(&field.as_str()) {
                report.warning(format!(
                    "field '{field}' is not supported by {} {level} bindings and will be dropped",
                    self.protocol()
                ));
            }
        }
        self.check(level, config, &mut report);
        report
    }

    /// Build the binding object: supported fields only, plus `bindingVersion`.
    fn build(&self, level: BindingLevel, config: &BindingConfig) -> Map<String, Value> {
        let supported = self.supported_fields(level);
        let mut binding: Map<String, Value> = config
            .iter()
            .filter(|(field, _)| supported.contains(&field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect();
        binding.insert(
            "bindingVersion".to_string(),
            Value::String(self.version().to_string()),
        );
        binding
    }
}

// ============================================================================
// Shared rule helpers
// ============================================================================

/// `field`, if present, must be one of `allowed`.
pub(crate) fn check_one_of(
    report: &mut BindingReport,
    config: &BindingConfig,
    field: &str,
    allowed: &[&str],
) {
    let Some(value) = config.get(field) else {
        return;
    };
    match value.as_str() {
        Some(text) if allowed.contains(&text) => {}
        _ => report.error(format!(
            "{field} must be one of {}, got {value}",
            allowed.join(", ")
        )),
    }
}

/// `field`, if present, must be a positive integer; values above
/// `warn_above` get a warning.
pub(crate) fn check_positive_integer(
    report: &mut BindingReport,
    config: &BindingConfig,
    field: &str,
    warn_above: i64,
) {
    let Some(value) = config.get(field) else {
        return;
    };
    match value.as_i64() {
        Some(n) if n > 0 => {
            if n > warn_above {
                report.warning(format!(
                    "{field} = {n} is unusually high (more than {warn_above})"
                ));
            }
        }
        _ => report.error(format!("{field} must be a positive integer, got {value}")),
    }
}

/// `field`, if present, must be an integer within `min..=max`.
pub(crate) fn check_integer_range(
    report: &mut BindingReport,
    config: &BindingConfig,
    field: &str,
    min: i64,
    max: i64,
) {
    let Some(value) = config.get(field) else {
        return;
    };
    match value.as_i64() {
        Some(n) if (min..=max).contains(&n) => {}
        _ => report.error(format!(
            "{field} must be an integer between {min} and {max}, got {value}"
        )),
    }
}

/// `field`, if present, must be a schema object; a typed schema must be
/// `type: object` when `require_object_type` is set.
pub(crate) fn check_schema_object(
    report: &mut BindingReport,
    config: &BindingConfig,
    field: &str,
    require_object_type: bool,
) {
    let Some(value) = config.get(field) else {
        return;
    };
    let Some(schema) = value.as_object() else {
        report.error(format!("{field} must be a schema object"));
        return;
    };
    if require_object_type
        && let Some(ty) = schema.get("type")
        && ty.as_str() != Some("object")
    {
        report.error(format!("{field} schema must have type 'object', got {ty}"));
    }
}

/// `field`, if present, must be a string.
pub(crate) fn check_string(report: &mut BindingReport, config: &BindingConfig, field: &str) {
    if let Some(value) = config.get(field)
        && !value.is_string()
    {
        report.error(format!("{field} must be a string, got {value}"));
    }
}

#[cfg(test)]
#[path = "binding/binding_tests.rs"]
mod binding_tests;
