//! Diagnostic catalog and reporting sink.
//!
//! Every diagnostic the pipeline can raise is listed in [`DiagnosticCode`]
//! with a fixed severity and message template. Templates use `{name}`
//! placeholders filled from named arguments when the diagnostic is built.

use serde::{Deserialize, Serialize};

/// Namespace prefixed to every rendered code.
pub const DIAGNOSTIC_NAMESPACE: &str = "asyncbridge";

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Closed set of diagnostic codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    MissingChannelPath,
    ConflictingOperationRole,
    DuplicateChannelId,
    DuplicateChannelAddress,
    DuplicateOperationId,
    DuplicateServerName,
    InvalidProtocolType,
    ChannelParameterMismatch,
    InvalidBinding,
    BindingWarning,
    InvalidSecurityScheme,
    DuplicateSecurityScheme,
    MissingMessageSchema,
    SchemaNameCollision,
    DuplicateMessageName,
    UnsupportedType,
    ExtensionFailed,
    MissingDocumentation,
}

impl DiagnosticCode {
    /// Every code, in catalog order.
    pub const ALL: [DiagnosticCode; 18] = [
        DiagnosticCode::MissingChannelPath,
        DiagnosticCode::ConflictingOperationRole,
        DiagnosticCode::DuplicateChannelId,
        DiagnosticCode::DuplicateChannelAddress,
        DiagnosticCode::DuplicateOperationId,
        DiagnosticCode::DuplicateServerName,
        DiagnosticCode::InvalidProtocolType,
        DiagnosticCode::ChannelParameterMismatch,
        DiagnosticCode::InvalidBinding,
        DiagnosticCode::BindingWarning,
        DiagnosticCode::InvalidSecurityScheme,
        DiagnosticCode::DuplicateSecurityScheme,
        DiagnosticCode::MissingMessageSchema,
        DiagnosticCode::SchemaNameCollision,
        DiagnosticCode::DuplicateMessageName,
        DiagnosticCode::UnsupportedType,
        DiagnosticCode::ExtensionFailed,
        DiagnosticCode::MissingDocumentation,
    ];

    /// Short kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            DiagnosticCode::MissingChannelPath => "missing-channel-path",
            DiagnosticCode::ConflictingOperationRole => "conflicting-operation-role",
            DiagnosticCode::DuplicateChannelId => "duplicate-channel-id",
            DiagnosticCode::DuplicateChannelAddress => "duplicate-channel-address",
            DiagnosticCode::DuplicateOperationId => "duplicate-operation-id",
            DiagnosticCode::DuplicateServerName => "duplicate-server-name",
            DiagnosticCode::InvalidProtocolType => "invalid-protocol-type",
            DiagnosticCode::ChannelParameterMismatch => "channel-parameter-mismatch",
            DiagnosticCode::InvalidBinding => "invalid-binding",
            DiagnosticCode::BindingWarning => "binding-warning",
            DiagnosticCode::InvalidSecurityScheme => "invalid-security-scheme",
            DiagnosticCode::DuplicateSecurityScheme => "duplicate-security-scheme",
            DiagnosticCode::MissingMessageSchema => "missing-message-schema",
            DiagnosticCode::SchemaNameCollision => "schema-name-collision",
            DiagnosticCode::DuplicateMessageName => "duplicate-message-name",
            DiagnosticCode::UnsupportedType => "unsupported-type",
            DiagnosticCode::ExtensionFailed => "extension-failed",
            DiagnosticCode::MissingDocumentation => "missing-documentation",
        }
    }

    /// Namespaced code, e.g. `asyncbridge/duplicate-channel-id`.
    pub fn code(self) -> String {
        format!("{DIAGNOSTIC_NAMESPACE}/{}", self.name())
    }

    pub fn severity(self) -> Severity {
        match self {
            DiagnosticCode::MissingChannelPath
            | DiagnosticCode::BindingWarning
            | DiagnosticCode::UnsupportedType
            | DiagnosticCode::MissingDocumentation => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether a diagnostic with this code rejects the whole emission.
    ///
    /// Invalid bindings are errors but only drop the binding they belong to.
    pub fn blocks_emission(self) -> bool {
        self.severity() == Severity::Error && self != DiagnosticCode::InvalidBinding
    }

    /// Message template with `{placeholder}` slots.
    pub fn template(self) -> &'static str {
        match self {
            DiagnosticCode::MissingChannelPath => {
                "Operation '{operation}' declares an empty channel path; using '{fallback}'."
            }
            DiagnosticCode::ConflictingOperationRole => {
                "Operation '{operation}' is marked both publish and subscribe."
            }
            DiagnosticCode::DuplicateChannelId => {
                "Channel id '{channel}' is already used by operation '{existing}'."
            }
            DiagnosticCode::DuplicateChannelAddress => {
                "Channel address '{address}' is already used by channel '{existing}'."
            }
            DiagnosticCode::DuplicateOperationId => {
                "Operation id '{operation}' is declared more than once."
            }
            DiagnosticCode::DuplicateServerName => {
                "Server name '{server}' is declared more than once."
            }
            DiagnosticCode::InvalidProtocolType => "Protocol '{protocol}' is not supported.",
            DiagnosticCode::ChannelParameterMismatch => {
                "Channel address '{address}' uses parameter '{parameter}' which operation '{operation}' does not declare."
            }
            DiagnosticCode::InvalidBinding => {
                "Invalid {protocol} {level} binding on '{target}': {details}"
            }
            DiagnosticCode::BindingWarning => "{protocol} {level} binding on '{target}': {details}",
            DiagnosticCode::InvalidSecurityScheme => {
                "Security scheme '{scheme}' is invalid: {details}"
            }
            DiagnosticCode::DuplicateSecurityScheme => {
                "Security scheme '{scheme}' is declared more than once with different settings."
            }
            DiagnosticCode::MissingMessageSchema => {
                "Operation '{operation}' declares a message but has no payload type."
            }
            DiagnosticCode::SchemaNameCollision => {
                "Schema name '{name}' is used by two different models."
            }
            DiagnosticCode::DuplicateMessageName => {
                "Message name '{name}' is already used by operation '{existing}' with a different message."
            }
            DiagnosticCode::UnsupportedType => {
                "Type of kind '{kind}' is not supported; emitted as a generic object."
            }
            DiagnosticCode::ExtensionFailed => "Extension '{extension}' failed: {details}",
            DiagnosticCode::MissingDocumentation => "'{target}' has no documentation.",
        }
    }

    /// Fill the template with named arguments.
    ///
    /// Placeholders without a matching argument are left as written.
    pub fn render(self, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.template().to_string(), |message, (name, value)| {
                message.replace(&format!("{{{name}}}"), value)
            })
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{DIAGNOSTIC_NAMESPACE}/{}", self.name())
    }
}

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,

    /// Qualified name of the node the diagnostic is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Diagnostic {
    /// Build a diagnostic from its catalog entry.
    pub fn new(code: DiagnosticCode, args: &[(&str, &str)]) -> Self {
        Self {
            code,
            severity: code.severity(),
            message: code.render(args),
            target: None,
        }
    }

    pub fn at(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn blocks_emission(&self) -> bool {
        self.is_error() && self.code.blocks_emission()
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)
    }
}

/// Receiver of diagnostics raised during emission.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Collects diagnostics in report order.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Whether any reported diagnostic rejects the emission.
    pub fn has_blocking(&self) -> bool {
        self.items.iter().any(Diagnostic::blocks_emission)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Whether any diagnostic with this code was reported.
    pub fn contains(&self, code: DiagnosticCode) -> bool {
        self.items.iter().any(|d| d.code == code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.items
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
#[path = "diagnostics/diagnostics_tests.rs"]
mod diagnostics_tests;
