//! asyncbridge-core - Input AST, annotation state, document model and extensions
//!
//! This crate provides the types shared by every stage of the emitter:
//! - [`ast`] for the typed program handed over by the front end
//! - [`AnnotationState`] for decorator metadata attached to program nodes
//! - [`AsyncApiDocument`] and [`SchemaNode`] for the emitted document
//! - [`Diagnostic`] and [`DiagnosticSink`] for reporting problems
//! - [`EmitterOptions`] for configuration
//! - [`Extension`] and [`ExtensionRegistry`] for pluggable passes

pub mod ast;
mod config;
pub mod diagnostics;
pub mod document;
mod error;
mod extension;
mod lifecycle;
pub mod schema;
pub mod security;
pub mod state;

pub use config::{
    CONFIG_FILE_NAME, EmitterOptions, ExtensionConfig, ExtensionMetadata, FileType,
    PATH_VARIABLES, template_variables,
};
pub use diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Diagnostics, Severity};
pub use document::{Action, AsyncApiDocument};
pub use error::{ConfigError, ExtensionError, ExtensionResult};
pub use extension::{Extension, ExtensionKind, ExtensionRegistry};
pub use lifecycle::ExtensionState;
pub use schema::{SchemaKind, SchemaNode, SchemaType};
pub use state::AnnotationState;

/// Log levels
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl LogLevel {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Trace,
            1 => LogLevel::Debug,
            2 => LogLevel::Info,
            3 => LogLevel::Warn,
            4 => LogLevel::Error,
            _ => LogLevel::Off,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" => Ok(LogLevel::Off),
            other => Err(ConfigError::invalid(
                "log-level",
                format!("unknown log level '{other}'"),
            )),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "TRACE"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Off => write!(f, "OFF"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ast::{Model, ModelId, Namespace, Operation, Parameter, Program, Property, Type};
    pub use crate::state::{Annotation, ChannelAnnotation, OperationRole, ProtocolAnnotation};
    pub use crate::{
        Action, AnnotationState, AsyncApiDocument, Diagnostic, DiagnosticCode, DiagnosticSink,
        Diagnostics, EmitterOptions, Extension, ExtensionConfig, ExtensionError, ExtensionKind,
        ExtensionMetadata, ExtensionRegistry, ExtensionResult, ExtensionState, FileType, LogLevel,
        SchemaNode, Severity,
    };
}

#[cfg(test)]
mod lib_tests;
