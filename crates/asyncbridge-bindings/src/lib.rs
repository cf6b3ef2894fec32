//! asyncbridge-bindings - Protocol binding builders and validators
//!
//! This crate provides:
//! - [`Protocol`] detection and default ports
//! - [`ProtocolBinding`] implementations for Kafka, WebSocket and HTTP
//! - [`BindingFactory`] to validate and build bindings by protocol tag

mod binding;
mod error;
mod factory;
mod http;
mod kafka;
mod protocol;
mod websocket;

pub use binding::{BindingLevel, BindingReport, ProtocolBinding};
pub use error::BindingError;
pub use factory::{BindingFactory, ValidatedBinding};
pub use http::HttpBinding;
pub use kafka::{KafkaBinding, MAX_TOPIC_LENGTH, check_topic_name};
pub use protocol::{Protocol, suggest_protocol};
pub use websocket::WebSocketBinding;
