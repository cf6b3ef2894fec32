//! Diagnostic sink that reports through `tracing`.

use asyncbridge_core::{Diagnostic, DiagnosticSink};
use tracing::{error, warn};

/// Forwards every reported diagnostic to `tracing`
///
/// Errors are logged at `error!`, warnings at `warn!`, with the diagnostic
/// code and location as structured fields.
#[derive(Debug, Default)]
pub struct TracingSink {
    errors: usize,
    warnings: usize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every diagnostic in order
    pub fn report_all(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors
    }

    pub fn warning_count(&self) -> usize {
        self.warnings
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        let code = diagnostic.code.code();
        let location = diagnostic.target.as_deref().unwrap_or("-");
        if diagnostic.is_error() {
            self.errors += 1;
            error!(code = %code, location = %location, "{}", diagnostic.message);
        } else {
            self.warnings += 1;
            warn!(code = %code, location = %location, "{}", diagnostic.message);
        }
    }
}
