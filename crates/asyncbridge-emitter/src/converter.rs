//! Type → JSON Schema conversion.
//!
//! Conversion is total: every [`Type`] maps to some [`SchemaNode`], with
//! unsupported kinds degrading to `{ "type": "object" }`. Named models that
//! are already being expanded are emitted as `$ref` edges, which is what
//! keeps recursive model graphs finite.

use asyncbridge_core::ast::{
    EnumDecl, EnumValue, IntrinsicKind, Model, ModelId, Program, ScalarKind, Type,
};
use asyncbridge_core::schema::{SchemaNode, SchemaType};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Knobs that change the shape of converted schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConverterOptions {
    /// Inline named models at their use site; when off every named model
    /// becomes a `$ref`.
    pub inline_models: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            inline_models: true,
        }
    }
}

/// Component key under which a model is registered.
///
/// Anonymous models are keyed by their arena index.
pub fn component_name(model: &Model, id: ModelId) -> String {
    model
        .name
        .clone()
        .unwrap_or_else(|| format!("Anonymous{}", id.0))
}

/// Converts types of one program into schema nodes.
///
/// One converter is used per top-level conversion; the `$ref` edges it
/// emits are recorded so the caller can register their targets.
pub struct SchemaConverter<'p> {
    program: &'p Program,
    options: ConverterOptions,
    expanding: Vec<ModelId>,
    referenced: BTreeSet<ModelId>,
    unsupported: Vec<&'static str>,
}

impl<'p> SchemaConverter<'p> {
    pub fn new(program: &'p Program, options: ConverterOptions) -> Self {
        Self {
            program,
            options,
            expanding: Vec::new(),
            referenced: BTreeSet::new(),
            unsupported: Vec::new(),
        }
    }

    /// Models referenced through `$ref` so far.
    pub fn referenced(&self) -> &BTreeSet<ModelId> {
        &self.referenced
    }

    /// Kinds that fell back to the generic object schema so far.
    pub fn unsupported(&self) -> &[&'static str] {
        &self.unsupported
    }

    /// Convert a type reference.
    pub fn convert(&mut self, ty: &Type) -> SchemaNode {
        match ty {
            Type::Scalar { scalar } => convert_scalar(*scalar),
            Type::Model { id } => self.convert_model_use(*id),
            Type::Array { element } => SchemaNode::array(self.convert(element)),
            Type::Record { value } => SchemaNode {
                additional_properties: Some(Box::new(self.convert(value))),
                ..SchemaNode::of_type(SchemaType::Object)
            },
            Type::Union { variants } => self.convert_union(variants),
            Type::Enum(decl) => convert_enum(decl),
            Type::StringLiteral { value } => {
                SchemaNode::enumeration(SchemaType::String, vec![Value::String(value.clone())])
            }
            Type::NumberLiteral { value } => {
                SchemaNode::enumeration(SchemaType::Number, vec![number_value(*value)])
            }
            Type::BooleanLiteral { value } => {
                SchemaNode::enumeration(SchemaType::Boolean, vec![Value::Bool(*value)])
            }
            Type::Intrinsic { name } => match name {
                IntrinsicKind::Null | IntrinsicKind::Void => SchemaNode::of_type(SchemaType::Null),
                IntrinsicKind::Unknown => SchemaNode::default(),
                IntrinsicKind::Never => self.fallback("never"),
            },
            Type::Tuple { elements } => self.convert_tuple(elements),
            Type::Unsupported => self.fallback(ty.kind_name()),
        }
    }

    /// Convert the full body of a model: its own properties, plus `allOf`
    /// composition with its base.
    pub fn convert_model(&mut self, id: ModelId) -> SchemaNode {
        let Some(model) = self.program.model(id) else {
            return self.fallback("model");
        };

        self.expanding.push(id);
        let own = self.convert_properties(model);
        let mut schema = match model.base {
            Some(base) => SchemaNode::all_of(vec![self.reference(base), own]),
            None => own,
        };
        self.expanding.pop();

        if let Some(doc) = &model.doc {
            schema.description = Some(doc.clone());
        }
        schema
    }

    fn convert_model_use(&mut self, id: ModelId) -> SchemaNode {
        let Some(model) = self.program.model(id) else {
            return self.fallback("model");
        };
        let on_stack = self.expanding.contains(&id);
        let as_reference = on_stack || (model.name.is_some() && !self.options.inline_models);
        if as_reference {
            self.reference(id)
        } else {
            self.convert_model(id)
        }
    }

    fn convert_properties(&mut self, model: &Model) -> SchemaNode {
        let mut properties = BTreeMap::new();
        let mut required = Vec::new();

        for property in &model.properties {
            let mut schema = self.convert(&property.ty);
            if let Some(doc) = &property.doc
                && schema.reference.is_none()
            {
                schema.description = Some(doc.clone());
            }
            properties.insert(property.name.clone(), schema);
            if !property.optional {
                required.push(property.name.clone());
            }
        }

        SchemaNode {
            properties: Some(properties),
            required: (!required.is_empty()).then_some(required),
            additional_properties: model
                .indexer
                .as_ref()
                .map(|indexer| Box::new(self.convert(indexer))),
            ..SchemaNode::of_type(SchemaType::Object)
        }
    }

    fn convert_union(&mut self, variants: &[Type]) -> SchemaNode {
        if let [single] = variants {
            return self.convert(single);
        }
        if let Some(enumeration) = literal_enum(variants) {
            return enumeration;
        }
        SchemaNode::one_of(variants.iter().map(|v| self.convert(v)).collect())
    }

    fn convert_tuple(&mut self, elements: &[Type]) -> SchemaNode {
        let mut items: Vec<SchemaNode> = Vec::new();
        for element in elements {
            let schema = self.convert(element);
            if !items.contains(&schema) {
                items.push(schema);
            }
        }
        match items.len() {
            0 => SchemaNode::of_type(SchemaType::Array),
            1 => SchemaNode::array(items.remove(0)),
            _ => SchemaNode::array(SchemaNode::one_of(items)),
        }
    }

    fn reference(&mut self, id: ModelId) -> SchemaNode {
        match self.program.model(id) {
            Some(model) => {
                self.referenced.insert(id);
                SchemaNode::component_ref(&component_name(model, id))
            }
            None => self.fallback("model"),
        }
    }

    fn fallback(&mut self, kind: &'static str) -> SchemaNode {
        self.unsupported.push(kind);
        SchemaNode::of_type(SchemaType::Object)
    }
}

fn convert_scalar(scalar: ScalarKind) -> SchemaNode {
    use ScalarKind::*;
    match scalar {
        String => SchemaNode::of_type(SchemaType::String),
        Boolean => SchemaNode::of_type(SchemaType::Boolean),
        Numeric | Integer | Float | Decimal | Decimal128 => SchemaNode::of_type(SchemaType::Number),
        Int8 | Int16 | Int32 | Uint8 | Uint16 => SchemaNode::formatted(SchemaType::Number, "int32"),
        Int64 | Uint32 | Uint64 | Safeint => SchemaNode::formatted(SchemaType::Number, "int64"),
        Float32 => SchemaNode::formatted(SchemaType::Number, "float"),
        Float64 => SchemaNode::formatted(SchemaType::Number, "double"),
        UtcDateTime | OffsetDateTime => SchemaNode::formatted(SchemaType::String, "date-time"),
        PlainDate => SchemaNode::formatted(SchemaType::String, "date"),
        PlainTime => SchemaNode::formatted(SchemaType::String, "time"),
        Duration => SchemaNode::formatted(SchemaType::String, "duration"),
        Bytes => SchemaNode::formatted(SchemaType::String, "binary"),
        Url => SchemaNode::formatted(SchemaType::String, "uri"),
    }
}

/// `{type, enum}` when every variant is a literal of one primitive type.
fn literal_enum(variants: &[Type]) -> Option<SchemaNode> {
    let (first, rest) = variants.split_first()?;
    let ty = literal_type(first)?;
    if rest.iter().any(|v| literal_type(v) != Some(ty)) {
        return None;
    }

    let mut values: Vec<Value> = Vec::with_capacity(variants.len());
    for variant in variants {
        let value = match variant {
            Type::StringLiteral { value } => Value::String(value.clone()),
            Type::NumberLiteral { value } => number_value(*value),
            Type::BooleanLiteral { value } => Value::Bool(*value),
            _ => return None,
        };
        if !values.contains(&value) {
            values.push(value);
        }
    }
    Some(SchemaNode::enumeration(ty, values))
}

fn literal_type(ty: &Type) -> Option<SchemaType> {
    match ty {
        Type::StringLiteral { .. } => Some(SchemaType::String),
        Type::NumberLiteral { .. } => Some(SchemaType::Number),
        Type::BooleanLiteral { .. } => Some(SchemaType::Boolean),
        _ => None,
    }
}

fn convert_enum(decl: &EnumDecl) -> SchemaNode {
    let values: Vec<Value> = decl
        .members
        .iter()
        .map(|member| match &member.value {
            Some(EnumValue::String(text)) => Value::String(text.clone()),
            Some(EnumValue::Number(n)) => number_value(*n),
            None => Value::String(member.name.clone()),
        })
        .collect();

    let mut schema = if values.iter().all(Value::is_string) {
        SchemaNode::enumeration(SchemaType::String, values)
    } else if values.iter().all(Value::is_number) {
        SchemaNode::enumeration(SchemaType::Number, values)
    } else {
        SchemaNode {
            enum_values: Some(values),
            ..SchemaNode::default()
        }
    };
    schema.description = decl.doc.clone();
    schema
}

/// Whole numbers render without a fractional part.
fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}

#[cfg(test)]
#[path = "converter/converter_tests.rs"]
mod converter_tests;
