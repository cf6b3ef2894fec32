//! Registry dispatching binding requests to per-protocol builders

use crate::{
    BindingError, BindingLevel, BindingReport, HttpBinding, KafkaBinding, Protocol,
    ProtocolBinding, WebSocketBinding,
};
use asyncbridge_core::state::BindingConfig;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// A binding that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBinding {
    /// Key under `bindings` (`kafka`, `ws`, `http`)
    pub key: &'static str,
    pub binding: Map<String, Value>,
    pub warnings: Vec<String>,
}

/// Maps each protocol to its builder/validator pair.
///
/// Adding a protocol means registering one more [`ProtocolBinding`].
pub struct BindingFactory {
    bindings: HashMap<Protocol, Box<dyn ProtocolBinding>>,
}

impl Default for BindingFactory {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl BindingFactory {
    /// Create a factory with no registered protocols
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a factory with Kafka, WebSocket and HTTP(S) registered
    pub fn with_defaults() -> Self {
        let mut factory = Self::empty();
        factory.register(Protocol::Kafka, Box::new(KafkaBinding));
        factory.register(Protocol::WebSocket, Box::new(WebSocketBinding));
        factory.register(Protocol::Http, Box::new(HttpBinding));
        factory.register(Protocol::Https, Box::new(HttpBinding));
        factory
    }

    /// Register (or replace) the builder for a protocol
    pub fn register(&mut self, protocol: Protocol, binding: Box<dyn ProtocolBinding>) {
        self.bindings.insert(protocol, binding);
    }

    pub fn supports(&self, protocol: Protocol) -> bool {
        self.bindings.contains_key(&protocol)
    }

    fn binding(&self, protocol: Protocol) -> Result<&dyn ProtocolBinding, BindingError> {
        self.bindings
            .get(&protocol)
            .map(|b| b.as_ref())
            .ok_or(BindingError::Unsupported(protocol))
    }

    /// Build a binding object without validating it
    pub fn create_binding(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
    ) -> Result<Map<String, Value>, BindingError> {
        Ok(self.binding(protocol)?.build(level, config))
    }

    /// Validate a configuration against the protocol's rules
    ///
    /// A protocol without a builder yields a single error.
    pub fn validate_binding(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
    ) -> BindingReport {
        match self.binding(protocol) {
            Ok(binding) => binding.validate(level, config),
            Err(err) => BindingReport {
                errors: vec![err.to_string()],
                warnings: Vec::new(),
            },
        }
    }

    /// Validate, then build only when validation reported no errors
    pub fn build_validated(
        &self,
        protocol: Protocol,
        level: BindingLevel,
        config: &BindingConfig,
    ) -> Result<ValidatedBinding, BindingError> {
        let binding = self.binding(protocol)?;
        let report = binding.validate(level, config);
        if !report.is_valid() {
            debug!(%protocol, %level, errors = report.errors.len(), "binding rejected");
            return Err(BindingError::Invalid {
                protocol,
                level,
                errors: report.errors,
            });
        }
        Ok(ValidatedBinding {
            key: protocol.binding_key(),
            binding: binding.build(level, config),
            warnings: report.warnings,
        })
    }
}
