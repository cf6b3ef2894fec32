//! Built-in documentation lint.

use asyncbridge_core::{
    AsyncApiDocument, Diagnostic, DiagnosticCode, Extension, ExtensionKind, ExtensionMetadata,
    ExtensionResult,
};

/// Warns about operations and channels that carry no description.
#[derive(Debug, Default)]
pub struct DocumentationLint;

impl DocumentationLint {
    pub const NAME: &'static str = "documentation-lint";
}

impl Extension for DocumentationLint {
    fn metadata(&self) -> ExtensionMetadata {
        ExtensionMetadata::new(Self::NAME, env!("CARGO_PKG_VERSION"))
    }

    fn kind(&self) -> ExtensionKind {
        ExtensionKind::Lint
    }

    fn execute(&self, document: &AsyncApiDocument) -> ExtensionResult<Vec<Diagnostic>> {
        let undocumented = |description: &Option<String>| {
            description.as_deref().is_none_or(|d| d.trim().is_empty())
        };

        let operations = document
            .operations
            .iter()
            .filter(|(_, op)| undocumented(&op.description))
            .map(|(name, _)| format!("operations.{name}"));
        let channels = document
            .channels
            .iter()
            .filter(|(_, channel)| undocumented(&channel.description))
            .map(|(key, _)| format!("channels.{key}"));

        Ok(operations
            .chain(channels)
            .map(|target| {
                Diagnostic::new(
                    DiagnosticCode::MissingDocumentation,
                    &[("target", target.as_str())],
                )
                .at(target)
            })
            .collect())
    }
}

#[cfg(test)]
#[path = "lint/lint_tests.rs"]
mod lint_tests;
