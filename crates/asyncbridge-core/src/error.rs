//! Error types for configuration loading and extension lifecycle

use crate::ExtensionState;
use thiserror::Error;

/// Result type alias for extension operations
pub type ExtensionResult<T> = Result<T, ExtensionError>;

/// Error type for emitter configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("failed to read configuration '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML configuration could not be parsed
    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON configuration could not be parsed
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value outside its allowed set
    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for extension lifecycle and execution
#[derive(Error, Debug)]
pub enum ExtensionError {
    /// Extension is not in a valid state for the requested operation
    #[error("invalid lifecycle state: cannot move from {from} to {to}")]
    InvalidState {
        from: ExtensionState,
        to: ExtensionState,
    },

    /// An extension with this name is already registered
    #[error("extension already registered: {0}")]
    AlreadyRegistered(String),

    /// No extension with this name is registered
    #[error("extension not found: {0}")]
    NotFound(String),

    /// Failed to initialize the extension
    #[error("initialization failed: {0}")]
    InitializationFailed(String),

    /// The extension reported a failure while executing
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// Failed to shut the extension down
    #[error("shutdown failed: {0}")]
    ShutdownFailed(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtensionError {
    /// Stable numeric code for reporting
    pub fn error_code(&self) -> u32 {
        match self {
            ExtensionError::InvalidState { .. } => 1,
            ExtensionError::AlreadyRegistered(_) => 2,
            ExtensionError::NotFound(_) => 3,
            ExtensionError::InitializationFailed(_) => 4,
            ExtensionError::ExecutionFailed(_) => 5,
            ExtensionError::ShutdownFailed(_) => 6,
            ExtensionError::Config(_) => 7,
        }
    }
}

impl From<serde_json::Error> for ExtensionError {
    fn from(err: serde_json::Error) -> Self {
        ExtensionError::Config(err.to_string())
    }
}
