//! Error types for binding construction

use crate::{BindingLevel, Protocol};
use thiserror::Error;

/// Error type for binding construction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindingError {
    /// The protocol tag is not one of the known protocols
    #[error("unknown protocol: {0}")]
    UnknownProtocol(String),

    /// The protocol is known but has no binding builder
    #[error("no binding support for protocol '{0}'")]
    Unsupported(Protocol),

    /// Validation reported errors, so the binding was not built
    #[error("invalid {protocol} {level} binding: {}", errors.join("; "))]
    Invalid {
        protocol: Protocol,
        level: BindingLevel,
        errors: Vec<String>,
    },
}
