//! Typed program tree handed over by the front end.
//!
//! The front end parses and type-checks the interface description and gives
//! us a fully resolved snapshot: a tree of namespaces holding operations, plus
//! an arena of models. Type references to models are index edges
//! ([`ModelId`]) into that arena, so self-referencing and mutually recursive
//! models never require recursive value copies.
//!
//! Everything here is plain data with serde support so a front end in another
//! process can ship the program as JSON.

use serde::{Deserialize, Serialize};

/// Index of a model in [`Program::models`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub usize);

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A complete, already resolved program.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The global namespace.
    pub root: Namespace,

    /// Arena of every model in the program.
    #[serde(default)]
    pub models: Vec<Model>,

    /// Source files the program was compiled from.
    #[serde(default)]
    pub source_files: Vec<String>,
}

impl Program {
    /// Create a program with the given root namespace and no models.
    pub fn new(root: Namespace) -> Self {
        Self {
            root,
            models: Vec::new(),
            source_files: Vec::new(),
        }
    }

    /// Add a model to the arena and return its id.
    pub fn add_model(&mut self, model: Model) -> ModelId {
        self.models.push(model);
        ModelId(self.models.len() - 1)
    }

    /// Look up a model by id.
    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }

    /// Record a source file.
    pub fn with_source_file(mut self, path: impl Into<String>) -> Self {
        self.source_files.push(path.into());
        self
    }
}

/// A namespace node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    /// Namespace name. The global namespace has an empty name.
    #[serde(default)]
    pub name: String,

    /// Operations declared directly in this namespace.
    #[serde(default)]
    pub operations: Vec<Operation>,

    /// Interfaces declared in this namespace.
    #[serde(default)]
    pub interfaces: Vec<Interface>,

    /// Child namespaces.
    ///
    /// `None` marks a malformed node; walkers treat it as having no children.
    #[serde(default)]
    pub namespaces: Option<Vec<Namespace>>,

    /// Documentation comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Namespace {
    /// Create an empty namespace.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
            interfaces: Vec::new(),
            namespaces: Some(Vec::new()),
            doc: None,
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn with_interface(mut self, interface: Interface) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn with_namespace(mut self, namespace: Namespace) -> Self {
        self.namespaces.get_or_insert_with(Vec::new).push(namespace);
        self
    }

    /// Child namespaces, empty when the collection is missing.
    pub fn children(&self) -> &[Namespace] {
        self.namespaces.as_deref().unwrap_or(&[])
    }
}

/// An interface groups operations inside a namespace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interface {
    pub name: String,

    #[serde(default)]
    pub operations: Vec<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            operations: Vec::new(),
            doc: None,
        }
    }

    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}

/// A named operation with parameters and an optional return (payload) type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub name: String,

    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Return type; `None` for operations returning `void`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<Type>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Operation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            doc: None,
        }
    }

    pub fn returns(mut self, ty: Type) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: Type,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Parameter {
    pub fn required(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            doc: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: Type) -> Self {
        Self {
            optional: true,
            ..Self::required(name, ty)
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A structural type with named properties, possibly extending a base model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// Model name; `None` for anonymous (inline) models.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Qualified name of the declaring namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub properties: Vec<Property>,

    /// Base model (`model Dog extends Pet`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<ModelId>,

    /// Value type of additional properties (`...Record<T>`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indexer: Option<Type>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Model {
    /// Create a named model.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Create an anonymous model.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn in_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }

    pub fn extends(mut self, base: ModelId) -> Self {
        self.base = Some(base);
        self
    }

    pub fn with_indexer(mut self, value: Type) -> Self {
        self.indexer = Some(value);
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Fully qualified name (`Namespace.Model`), if the model is named.
    pub fn qualified_name(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        Some(match self.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => format!("{ns}.{name}"),
            _ => name.to_string(),
        })
    }
}

/// A model property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,

    #[serde(rename = "type")]
    pub ty: Type,

    #[serde(default)]
    pub optional: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Property {
    pub fn required(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            optional: false,
            doc: None,
        }
    }

    pub fn optional(name: impl Into<String>, ty: Type) -> Self {
        Self {
            optional: true,
            ..Self::required(name, ty)
        }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// A type reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Type {
    /// Built-in scalar.
    Scalar { scalar: ScalarKind },

    /// Reference to a model in the arena.
    Model { id: ModelId },

    /// `T[]`
    Array { element: Box<Type> },

    /// `Record<T>`
    Record { value: Box<Type> },

    /// `A | B | ...`
    Union { variants: Vec<Type> },

    /// Enum declaration.
    Enum(EnumDecl),

    StringLiteral { value: String },

    NumberLiteral { value: f64 },

    BooleanLiteral { value: bool },

    /// `null`, `unknown`, `void`, `never`.
    Intrinsic { name: IntrinsicKind },

    /// `[A, B]`
    Tuple { elements: Vec<Type> },

    /// Any kind the front end produced that we do not model.
    #[serde(other)]
    Unsupported,
}

impl Type {
    pub fn scalar(scalar: ScalarKind) -> Self {
        Type::Scalar { scalar }
    }

    pub fn string() -> Self {
        Type::scalar(ScalarKind::String)
    }

    pub fn boolean() -> Self {
        Type::scalar(ScalarKind::Boolean)
    }

    pub fn model(id: ModelId) -> Self {
        Type::Model { id }
    }

    pub fn array(element: Type) -> Self {
        Type::Array {
            element: Box::new(element),
        }
    }

    pub fn record(value: Type) -> Self {
        Type::Record {
            value: Box::new(value),
        }
    }

    pub fn union(variants: Vec<Type>) -> Self {
        Type::Union { variants }
    }

    pub fn string_literal(value: impl Into<String>) -> Self {
        Type::StringLiteral {
            value: value.into(),
        }
    }

    /// Union of string literals, e.g. `"active" | "inactive"`.
    pub fn string_union(values: &[&str]) -> Self {
        Type::union(values.iter().map(|v| Type::string_literal(*v)).collect())
    }

    /// Short kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Scalar { .. } => "scalar",
            Type::Model { .. } => "model",
            Type::Array { .. } => "array",
            Type::Record { .. } => "record",
            Type::Union { .. } => "union",
            Type::Enum(_) => "enum",
            Type::StringLiteral { .. } => "string-literal",
            Type::NumberLiteral { .. } => "number-literal",
            Type::BooleanLiteral { .. } => "boolean-literal",
            Type::Intrinsic { .. } => "intrinsic",
            Type::Tuple { .. } => "tuple",
            Type::Unsupported => "unsupported",
        }
    }
}

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarKind {
    String,
    Boolean,
    Numeric,
    Integer,
    Float,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Safeint,
    Float32,
    Float64,
    Decimal,
    Decimal128,
    UtcDateTime,
    OffsetDateTime,
    PlainDate,
    PlainTime,
    Duration,
    Bytes,
    Url,
}

/// Intrinsic types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntrinsicKind {
    Null,
    Unknown,
    Void,
    Never,
}

/// An enum declaration with its members.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumDecl {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub members: Vec<EnumMember>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

/// A single enum member. Members without an explicit value use their name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<EnumValue>,
}

/// Explicit enum member value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Number(f64),
}

/// Join a namespace prefix and a child name with `.`, skipping empty parts.
pub fn qualify(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{name}"),
    }
}
