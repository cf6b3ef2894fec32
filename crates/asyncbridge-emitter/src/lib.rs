//! asyncbridge-emitter - AsyncAPI 3.0 emitter
//!
//! This crate turns a typed [`Program`](asyncbridge_core::ast::Program) plus
//! its [`AnnotationState`](asyncbridge_core::AnnotationState) into an
//! [`AsyncApiDocument`](asyncbridge_core::AsyncApiDocument):
//! - [`SchemaConverter`] maps types to JSON Schema nodes
//! - [`discover_operations`] and [`describe_operation`] walk the namespace tree
//! - [`DocumentAssembler`] folds operations into one document
//! - [`Emitter`] orchestrates the whole pass and writes the result
//! - [`JsonCodec`] and [`YamlCodec`] render documents with provenance
//!
//! # Example
//!
//! ```
//! use asyncbridge_core::ast::{Namespace, Operation, Program, Type};
//! use asyncbridge_core::{AnnotationState, EmitterOptions};
//! use asyncbridge_emitter::Emitter;
//!
//! let program = Program::new(
//!     Namespace::new("Chat").with_operation(Operation::new("sendMessage").returns(Type::string())),
//! );
//!
//! let emission = Emitter::new(EmitterOptions::default())
//!     .emit(&program, &AnnotationState::new())
//!     .unwrap();
//!
//! assert_eq!(emission.document.channels["channel_sendMessage"].address, "/sendmessage");
//! ```

mod assembler;
mod codec;
mod converter;
mod emitter;
mod lint;
pub mod naming;
mod path;
mod walker;

pub use assembler::{AssemblerOptions, DocumentAssembler, dangling_references};
pub use codec::{
    CodecError, DocumentCodec, GENERATOR, JsonCodec, PROVENANCE_KEY, Provenance, YamlCodec,
    codec_for,
};
pub use converter::{ConverterOptions, SchemaConverter, component_name};
pub use emitter::{EmitError, Emission, Emitter};
pub use lint::DocumentationLint;
pub use path::{
    PathContext, PathTemplateError, resolve_output_path, resolve_output_path_or_fallback,
};
pub use walker::{
    DiscoveredOperation, OperationDescriptor, ParameterDescriptor, describe_operation,
    discover_namespaces, discover_operations,
};
