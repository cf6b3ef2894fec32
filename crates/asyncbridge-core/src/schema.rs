//! JSON-Schema-shaped schema nodes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Prefix of every component schema reference.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Primitive `type` keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Object,
    Array,
    String,
    Number,
    Integer,
    Boolean,
    Null,
}

/// Structural kind of a [`SchemaNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
    Enum,
    Union,
    Ref,
    /// No constraint at all (`{}`), or an `allOf` composition.
    Any,
}

/// A JSON Schema node.
///
/// Only the keywords the emitter produces are modelled; unknown keywords in
/// parsed documents are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<SchemaType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaNode>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    /// `{ "type": <ty> }`
    pub fn of_type(ty: SchemaType) -> Self {
        Self {
            schema_type: Some(ty),
            ..Self::default()
        }
    }

    /// `{ "type": <ty>, "format": <format> }`
    pub fn formatted(ty: SchemaType, format: impl Into<String>) -> Self {
        Self {
            format: Some(format.into()),
            ..Self::of_type(ty)
        }
    }

    /// `{ "$ref": <reference> }`
    pub fn reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// `{ "$ref": "#/components/schemas/<name>" }`
    pub fn component_ref(name: &str) -> Self {
        Self::reference(format!("{SCHEMA_REF_PREFIX}{name}"))
    }

    /// `{ "type": "array", "items": <items> }`
    pub fn array(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// `{ "type": <ty>, "enum": [...] }`
    pub fn enumeration(ty: SchemaType, values: Vec<Value>) -> Self {
        Self {
            enum_values: Some(values),
            ..Self::of_type(ty)
        }
    }

    /// `{ "oneOf": [...] }`
    pub fn one_of(variants: Vec<SchemaNode>) -> Self {
        Self {
            one_of: Some(variants),
            ..Self::default()
        }
    }

    /// `{ "allOf": [...] }`
    pub fn all_of(parts: Vec<SchemaNode>) -> Self {
        Self {
            all_of: Some(parts),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Structural kind of this node.
    pub fn kind(&self) -> SchemaKind {
        if self.reference.is_some() {
            return SchemaKind::Ref;
        }
        if self.enum_values.is_some() {
            return SchemaKind::Enum;
        }
        if self.one_of.is_some() {
            return SchemaKind::Union;
        }
        match self.schema_type {
            Some(SchemaType::Object) => SchemaKind::Object,
            Some(SchemaType::Array) => SchemaKind::Array,
            Some(SchemaType::String) => SchemaKind::String,
            Some(SchemaType::Number | SchemaType::Integer) => SchemaKind::Number,
            Some(SchemaType::Boolean) => SchemaKind::Boolean,
            Some(SchemaType::Null) => SchemaKind::Null,
            None => SchemaKind::Any,
        }
    }

    /// Name of the component this node references, if it is a component `$ref`.
    pub fn referenced_component(&self) -> Option<&str> {
        self.reference.as_deref()?.strip_prefix(SCHEMA_REF_PREFIX)
    }

    /// Visit this node and every nested node, depth first.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a SchemaNode)) {
        visit(self);
        if let Some(properties) = &self.properties {
            for child in properties.values() {
                child.walk(visit);
            }
        }
        if let Some(items) = &self.items {
            items.walk(visit);
        }
        if let Some(additional) = &self.additional_properties {
            additional.walk(visit);
        }
        for group in [&self.one_of, &self.all_of].into_iter().flatten() {
            for child in group {
                child.walk(visit);
            }
        }
    }
}
