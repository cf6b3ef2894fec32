//! The AsyncAPI document model produced by the emitter.
//!
//! Every map is a [`BTreeMap`] so serialised output is ordered and stable
//! between runs.

use crate::schema::{SCHEMA_REF_PREFIX, SchemaNode};
use crate::security::SecurityScheme;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Top-level `asyncapi` version emitted and accepted.
pub const ASYNCAPI_VERSION: &str = "3.0.0";

/// `bindingVersion` stamped on every Kafka binding.
pub const KAFKA_BINDING_VERSION: &str = "0.5.0";

/// `bindingVersion` stamped on every WebSocket binding.
pub const WEBSOCKET_BINDING_VERSION: &str = "0.1.0";

/// `bindingVersion` stamped on every HTTP binding.
pub const HTTP_BINDING_VERSION: &str = "0.3.0";

/// Bindings keyed by protocol binding key (`kafka`, `ws`, `http`, ...).
pub type Bindings = BTreeMap<String, Value>;

/// Direction of an operation relative to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Send,
    Receive,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Action::Send => "send",
            Action::Receive => "receive",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A local JSON reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub reference: String,
}

impl Reference {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    /// `#/channels/<key>`
    pub fn channel(key: &str) -> Self {
        Self::new(format!("#/channels/{key}"))
    }

    /// `#/channels/<channel>/messages/<message>`
    pub fn channel_message(channel: &str, message: &str) -> Self {
        Self::new(format!("#/channels/{channel}/messages/{message}"))
    }

    /// `#/components/messages/<name>`
    pub fn message(name: &str) -> Self {
        Self::new(format!("#/components/messages/{name}"))
    }

    /// `#/components/schemas/<name>`
    pub fn schema(name: &str) -> Self {
        Self::new(format!("{SCHEMA_REF_PREFIX}{name}"))
    }

    /// `#/components/securitySchemes/<name>`
    pub fn security_scheme(name: &str) -> Self {
        Self::new(format!("#/components/securitySchemes/{name}"))
    }

    /// Path segments of a local reference (`#/a/b` → `["a", "b"]`).
    ///
    /// Returns `None` for non-local references.
    pub fn segments(&self) -> Option<Vec<&str>> {
        let path = self.reference.strip_prefix("#/")?;
        Some(path.split('/').collect())
    }
}

/// The `info` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            description: None,
        }
    }
}

/// A named connection endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub host: String,
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Bindings>,
}

/// A channel address parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelParameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One addressable channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub address: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, Reference>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, ChannelParameter>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Bindings>,
}

impl Channel {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            title: None,
            description: None,
            messages: BTreeMap::new(),
            parameters: BTreeMap::new(),
            bindings: None,
        }
    }
}

/// One operation on a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub action: Action,
    pub channel: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub security: Vec<Reference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Bindings>,
}

/// A payload contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    pub payload: Reference,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<Bindings>,
}

/// Reusable document fragments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub schemas: BTreeMap<String, SchemaNode>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub messages: BTreeMap<String, Message>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

impl Components {
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty() && self.messages.is_empty() && self.security_schemes.is_empty()
    }
}

/// The aggregate AsyncAPI 3.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsyncApiDocument {
    pub asyncapi: String,
    pub info: Info,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub servers: BTreeMap<String, Server>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub channels: BTreeMap<String, Channel>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, Operation>,

    #[serde(default, skip_serializing_if = "Components::is_empty")]
    pub components: Components,
}

impl AsyncApiDocument {
    /// Create an empty document for the given info block.
    pub fn new(info: Info) -> Self {
        Self {
            asyncapi: ASYNCAPI_VERSION.to_string(),
            info,
            servers: BTreeMap::new(),
            channels: BTreeMap::new(),
            operations: BTreeMap::new(),
            components: Components::default(),
        }
    }

    /// Resolve a local reference against this document.
    ///
    /// Supports the reference shapes the emitter produces: channels, channel
    /// messages, component schemas, messages and security schemes.
    pub fn resolves(&self, reference: &Reference) -> bool {
        match reference.segments().as_deref() {
            Some(["channels", channel]) => self.channels.contains_key(*channel),
            Some(["channels", channel, "messages", message]) => self
                .channels
                .get(*channel)
                .is_some_and(|c| c.messages.contains_key(*message)),
            Some(["components", "schemas", name]) => self.components.schemas.contains_key(*name),
            Some(["components", "messages", name]) => {
                self.components.messages.contains_key(*name)
            }
            Some(["components", "securitySchemes", name]) => {
                self.components.security_schemes.contains_key(*name)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "document/document_tests.rs"]
mod document_tests;
