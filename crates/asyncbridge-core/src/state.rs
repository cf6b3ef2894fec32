//! Annotation (decorator) state attached to program nodes.
//!
//! The front end records declarative metadata out-of-band, keyed by the
//! qualified name of the decorated node. [`AnnotationState`] is an immutable
//! snapshot of that metadata; it is built once, then passed by reference into
//! the walker and everything downstream of it.

use crate::document::Action;
use crate::security::SecurityScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Protocol-specific binding configuration as written by the user.
pub type BindingConfig = serde_json::Map<String, serde_json::Value>;

/// The fixed set of well-known state categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateKey {
    ChannelPath,
    OperationRole,
    ProtocolConfig,
    SecurityConfig,
    MessageConfig,
    ServerConfig,
}

/// Publish/subscribe role declared on an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationRole {
    Publish,
    Subscribe,
}

impl OperationRole {
    /// Document action for this role.
    pub fn action(self) -> Action {
        match self {
            OperationRole::Publish => Action::Send,
            OperationRole::Subscribe => Action::Receive,
        }
    }
}

/// A single metadata record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Annotation {
    Channel(ChannelAnnotation),
    Role { role: OperationRole },
    Protocol(ProtocolAnnotation),
    Security(SecurityAnnotation),
    Message(MessageAnnotation),
    Server(ServerAnnotation),
}

impl Annotation {
    /// State category this record belongs to.
    pub fn key(&self) -> StateKey {
        match self {
            Annotation::Channel(_) => StateKey::ChannelPath,
            Annotation::Role { .. } => StateKey::OperationRole,
            Annotation::Protocol(_) => StateKey::ProtocolConfig,
            Annotation::Security(_) => StateKey::SecurityConfig,
            Annotation::Message(_) => StateKey::MessageConfig,
            Annotation::Server(_) => StateKey::ServerConfig,
        }
    }
}

/// `@channel("/users/{id}")`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelAnnotation {
    /// Channel address, possibly templated.
    pub path: String,

    /// Explicit channel key in the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ChannelAnnotation {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// `@protocol(...)`: transport tag plus per-level binding configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolAnnotation {
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<BindingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<BindingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<BindingConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<BindingConfig>,
}

impl ProtocolAnnotation {
    pub fn new(protocol: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, config: BindingConfig) -> Self {
        self.channel = Some(config);
        self
    }

    pub fn with_operation(mut self, config: BindingConfig) -> Self {
        self.operation = Some(config);
        self
    }

    pub fn with_message(mut self, config: BindingConfig) -> Self {
        self.message = Some(config);
        self
    }
}

/// `@security(...)`: a named security scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityAnnotation {
    pub name: String,
    pub scheme: SecurityScheme,
}

/// `@message(...)`: message naming and documentation overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MessageAnnotation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// `@server(...)`: a connection endpoint declared on a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerAnnotation {
    pub name: String,
    pub host: String,
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<BindingConfig>,
}

impl ServerAnnotation {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        protocol: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            protocol: protocol.into(),
            ..Self::default()
        }
    }
}

/// Action resolved from the roles on one operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleResolution {
    pub action: Action,

    /// Both publish and subscribe were declared.
    pub conflict: bool,
}

/// Immutable annotation snapshot keyed by target qualified name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationState {
    entries: BTreeMap<String, Vec<Annotation>>,
}

impl AnnotationState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an annotation to a target, consuming and returning the state.
    pub fn with(mut self, target: impl Into<String>, annotation: Annotation) -> Self {
        self.entries
            .entry(target.into())
            .or_default()
            .push(annotation);
        self
    }

    /// Number of annotated targets.
    pub fn target_count(&self) -> usize {
        self.entries.len()
    }

    /// All records of one category on a target, in declaration order.
    pub fn records<'a>(
        &'a self,
        target: &str,
        key: StateKey,
    ) -> impl Iterator<Item = &'a Annotation> + 'a {
        self.entries
            .get(target)
            .into_iter()
            .flatten()
            .filter(move |a| a.key() == key)
    }

    pub fn channel(&self, target: &str) -> Option<&ChannelAnnotation> {
        self.records(target, StateKey::ChannelPath)
            .find_map(|a| match a {
                Annotation::Channel(channel) => Some(channel),
                _ => None,
            })
    }

    pub fn roles(&self, target: &str) -> Vec<OperationRole> {
        self.records(target, StateKey::OperationRole)
            .filter_map(|a| match a {
                Annotation::Role { role } => Some(*role),
                _ => None,
            })
            .collect()
    }

    pub fn protocol(&self, target: &str) -> Option<&ProtocolAnnotation> {
        self.records(target, StateKey::ProtocolConfig)
            .find_map(|a| match a {
                Annotation::Protocol(protocol) => Some(protocol),
                _ => None,
            })
    }

    pub fn security(&self, target: &str) -> Vec<&SecurityAnnotation> {
        self.records(target, StateKey::SecurityConfig)
            .filter_map(|a| match a {
                Annotation::Security(security) => Some(security),
                _ => None,
            })
            .collect()
    }

    pub fn message(&self, target: &str) -> Option<&MessageAnnotation> {
        self.records(target, StateKey::MessageConfig)
            .find_map(|a| match a {
                Annotation::Message(message) => Some(message),
                _ => None,
            })
    }

    pub fn servers(&self, target: &str) -> Vec<&ServerAnnotation> {
        self.records(target, StateKey::ServerConfig)
            .filter_map(|a| match a {
                Annotation::Server(server) => Some(server),
                _ => None,
            })
            .collect()
    }

    /// Resolve the document action of an operation.
    ///
    /// No role means `send`. When both roles are present the first one
    /// declared wins and `conflict` is set.
    pub fn resolve_action(&self, target: &str) -> RoleResolution {
        let roles = self.roles(target);
        let action = roles
            .first()
            .map(|role| role.action())
            .unwrap_or(Action::Send);
        let conflict = roles.contains(&OperationRole::Publish)
            && roles.contains(&OperationRole::Subscribe);
        RoleResolution { action, conflict }
    }
}
