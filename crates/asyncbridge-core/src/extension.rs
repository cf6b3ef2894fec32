//! Extension trait and the registry that drives extension lifecycles.

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use crate::document::AsyncApiDocument;
use crate::{ExtensionConfig, ExtensionError, ExtensionMetadata, ExtensionResult, ExtensionState};
use tracing::{debug, warn};

/// When an extension runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// Inspects the finished document and reports diagnostics
    Lint,
    /// Runs after the document has been written
    PostEmit,
}

/// A pluggable pass over the finished document
///
/// # Example
///
/// ```ignore
/// use asyncbridge_core::prelude::*;
///
/// struct ChannelCount;
///
/// impl Extension for ChannelCount {
///     fn metadata(&self) -> ExtensionMetadata {
///         ExtensionMetadata::new("channel-count", "0.1.0")
///     }
///
///     fn kind(&self) -> ExtensionKind {
///         ExtensionKind::Lint
///     }
///
///     fn execute(&self, document: &AsyncApiDocument) -> ExtensionResult<Vec<Diagnostic>> {
///         tracing::info!(channels = document.channels.len());
///         Ok(Vec::new())
///     }
/// }
/// ```
pub trait Extension: Send + Sync {
    fn metadata(&self) -> ExtensionMetadata;

    fn kind(&self) -> ExtensionKind;

    /// Called once before activation
    fn initialize(&mut self, _config: &ExtensionConfig) -> ExtensionResult<()> {
        Ok(())
    }

    fn execute(&self, document: &AsyncApiDocument) -> ExtensionResult<Vec<Diagnostic>>;

    /// Called once when the registry shuts down
    fn shutdown(&mut self) -> ExtensionResult<()> {
        Ok(())
    }
}

struct ExtensionEntry {
    name: String,
    extension: Box<dyn Extension>,
    config: ExtensionConfig,
    state: ExtensionState,
}

impl ExtensionEntry {
    fn transition_to(&mut self, target: ExtensionState) -> ExtensionResult<()> {
        if !self.state.can_transition_to(target) {
            return Err(ExtensionError::InvalidState {
                from: self.state,
                to: target,
            });
        }
        debug!(extension = %self.name, from = %self.state, to = %target, "extension state change");
        self.state = target;
        Ok(())
    }

    fn fail(&mut self, err: &ExtensionError, sink: &mut dyn DiagnosticSink) {
        warn!(extension = %self.name, error = %err, "extension failed");
        if self.state.can_transition_to(ExtensionState::Failed) {
            self.state = ExtensionState::Failed;
        }
        let details = err.to_string();
        sink.report(
            Diagnostic::new(
                DiagnosticCode::ExtensionFailed,
                &[("extension", self.name.as_str()), ("details", details.as_str())],
            )
            .at(self.name.clone()),
        );
    }
}

/// Ordered set of extensions with per-instance lifecycle state
#[derive(Default)]
pub struct ExtensionRegistry {
    entries: Vec<ExtensionEntry>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an extension; names must be unique
    pub fn register(
        &mut self,
        extension: Box<dyn Extension>,
        config: ExtensionConfig,
    ) -> ExtensionResult<()> {
        let name = extension.metadata().name;
        if self.entries.iter().any(|e| e.name == name) {
            return Err(ExtensionError::AlreadyRegistered(name));
        }
        let mut entry = ExtensionEntry {
            name,
            extension,
            config,
            state: ExtensionState::Unregistered,
        };
        entry.transition_to(ExtensionState::Registered)?;
        self.entries.push(entry);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current state of a registered extension
    pub fn state(&self, name: &str) -> Option<ExtensionState> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.state)
    }

    /// Initialize and activate one registered extension
    pub fn start(&mut self, name: &str) -> ExtensionResult<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| ExtensionError::NotFound(name.to_string()))?;
        start_entry(entry)
    }

    /// Initialize and activate every enabled extension still in `Registered`
    ///
    /// Failures move the extension to `Failed` and are reported to `sink`.
    pub fn start_all(&mut self, sink: &mut dyn DiagnosticSink) {
        for entry in &mut self.entries {
            if entry.state != ExtensionState::Registered || !entry.config.enabled {
                continue;
            }
            if let Err(err) = start_entry(entry) {
                entry.fail(&err, sink);
            }
        }
    }

    /// Run every active extension of `kind` in registration order
    ///
    /// Returns the number of extensions executed. Reported diagnostics and
    /// extension failures go to `sink`.
    pub fn execute_all(
        &mut self,
        kind: ExtensionKind,
        document: &AsyncApiDocument,
        sink: &mut dyn DiagnosticSink,
    ) -> usize {
        let mut executed = 0;
        for entry in &mut self.entries {
            if !entry.state.can_execute() || entry.extension.kind() != kind {
                continue;
            }
            executed += 1;
            match entry.extension.execute(document) {
                Ok(diagnostics) => diagnostics.into_iter().for_each(|d| sink.report(d)),
                Err(err) => entry.fail(&err, sink),
            }
        }
        executed
    }

    /// Shut down every non-terminal extension
    pub fn shutdown_all(&mut self, sink: &mut dyn DiagnosticSink) {
        for entry in &mut self.entries {
            if entry.state.is_terminal() || !entry.state.can_transition_to(ExtensionState::Shutdown)
            {
                continue;
            }
            let result = entry
                .extension
                .shutdown()
                .map_err(|e| ExtensionError::ShutdownFailed(e.to_string()));
            match result {
                Ok(()) => {
                    if let Err(err) = entry.transition_to(ExtensionState::Shutdown) {
                        entry.fail(&err, sink);
                    }
                }
                Err(err) => entry.fail(&err, sink),
            }
        }
    }
}

fn start_entry(entry: &mut ExtensionEntry) -> ExtensionResult<()> {
    if entry.state != ExtensionState::Registered {
        return Err(ExtensionError::InvalidState {
            from: entry.state,
            to: ExtensionState::Initialized,
        });
    }
    if let Err(err) = entry.extension.initialize(&entry.config) {
        entry.state = ExtensionState::Failed;
        return Err(ExtensionError::InitializationFailed(err.to_string()));
    }
    entry.transition_to(ExtensionState::Initialized)?;
    entry.transition_to(ExtensionState::Active)
}
