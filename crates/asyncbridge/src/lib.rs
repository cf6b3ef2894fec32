//! # asyncbridge
//!
//! Emits AsyncAPI 3.0 documents from a typed interface program and validates
//! the result.
//!
//! asyncbridge takes a fully resolved program (namespaces, operations, models)
//! together with the annotations a front end attached to it, and provides:
//! - Channel, operation and message assembly with JSON Schema payloads
//! - Kafka, WebSocket and HTTP protocol bindings with validation
//! - JSON and YAML output with provenance
//! - Two-phase document validation
//!
//! ## Emitting a document
//!
//! ```
//! use asyncbridge::prelude::*;
//!
//! let mut program = Program::default();
//! let event = program.add_model(
//!     Model::named("UserEvent")
//!         .with_property(Property::required("id", Type::string()))
//!         .with_property(Property::required("status", Type::string_union(&["active", "inactive"]))),
//! );
//! program.root = Namespace::new("Users")
//!     .with_operation(Operation::new("publishUserEvent").returns(Type::model(event)));
//!
//! let state = AnnotationState::new().with(
//!     "Users.publishUserEvent",
//!     Annotation::Channel(ChannelAnnotation::new("user.events")),
//! );
//!
//! let emission = Emitter::new(EmitterOptions::default()).emit(&program, &state).unwrap();
//! let result = DocumentValidator::new().validate_document(&emission.document);
//!
//! assert_eq!(emission.document.channels["channel_publishUserEvent"].address, "user.events");
//! assert!(result.valid);
//! ```
//!
//! ## Crate Structure
//!
//! This is a facade crate that re-exports from:
//! - [`asyncbridge_core`] - Input AST, annotations, document model, extensions
//! - [`asyncbridge_bindings`] - Protocol bindings
//! - [`asyncbridge_emitter`] - Schema conversion, assembly, serialization
//! - [`asyncbridge_validator`] - Document validation
//! - [`asyncbridge_logging`] - Tracing setup

pub use asyncbridge_core::{ast, document, security, state};

// Re-export core types
pub use asyncbridge_core::{
    AnnotationState, AsyncApiDocument, Diagnostic, DiagnosticCode, DiagnosticSink, Diagnostics,
    EmitterOptions, Extension, ExtensionConfig, ExtensionKind, ExtensionRegistry, FileType,
    LogLevel, SchemaNode, Severity,
};

// Re-export bindings
pub use asyncbridge_bindings::{BindingFactory, Protocol};

// Re-export the emitter
pub use asyncbridge_emitter::{
    DocumentCodec, EmitError, Emission, Emitter, JsonCodec, PathContext, YamlCodec, codec_for,
};

// Re-export the validator
pub use asyncbridge_validator::{
    DocumentValidator, IssueKind, ValidationIssue, ValidationMetrics, ValidationResult,
};

// Re-export logging
pub use asyncbridge_logging::{TracingSink, init_logging};

// Re-export common dependencies
pub use serde;
pub use serde_json;
pub use tracing;

/// Prelude module for convenient imports.
///
/// Use `use asyncbridge::prelude::*;` to import the program builders, the
/// emitter and the validator.
pub mod prelude {
    // Program and annotations
    pub use asyncbridge_core::ast::{
        Model, ModelId, Namespace, Operation, Parameter, Program, Property, Type,
    };
    pub use asyncbridge_core::state::{
        Annotation, ChannelAnnotation, OperationRole, ProtocolAnnotation,
    };

    // Emitting and validating
    pub use crate::{
        AnnotationState, AsyncApiDocument, Diagnostic, DiagnosticCode, DocumentValidator,
        EmitError, Emission, Emitter, EmitterOptions, FileType, IssueKind, PathContext,
        ValidationResult,
    };
}
