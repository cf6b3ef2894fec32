#![allow(non_snake_case)]

use super::*;
use asyncbridge_core::ast::{EnumMember, Property};
use asyncbridge_core::schema::SchemaKind;
use serde_json::json;
use test_case::test_case;

fn convert(program: &Program, ty: &Type) -> SchemaNode {
    SchemaConverter::new(program, ConverterOptions::default()).convert(ty)
}

fn tree_program() -> (Program, ModelId) {
    let mut program = Program::default();
    let id = ModelId(0);
    program.add_model(
        Model::named("TreeNode")
            .with_property(Property::required("value", Type::string()))
            .with_property(Property::optional("children", Type::array(Type::model(id)))),
    );
    (program, id)
}

// ============================================================================
// Scalars
// ============================================================================

#[test_case(ScalarKind::String, SchemaType::String, None ; "string")]
#[test_case(ScalarKind::Boolean, SchemaType::Boolean, None ; "boolean")]
#[test_case(ScalarKind::Integer, SchemaType::Number, None ; "integer")]
#[test_case(ScalarKind::Int32, SchemaType::Number, Some("int32") ; "int32")]
#[test_case(ScalarKind::Uint16, SchemaType::Number, Some("int32") ; "uint16")]
#[test_case(ScalarKind::Int64, SchemaType::Number, Some("int64") ; "int64")]
#[test_case(ScalarKind::Safeint, SchemaType::Number, Some("int64") ; "safeint")]
#[test_case(ScalarKind::Float32, SchemaType::Number, Some("float") ; "float32")]
#[test_case(ScalarKind::Float64, SchemaType::Number, Some("double") ; "float64")]
#[test_case(ScalarKind::UtcDateTime, SchemaType::String, Some("date-time") ; "utc date time")]
#[test_case(ScalarKind::PlainDate, SchemaType::String, Some("date") ; "plain date")]
#[test_case(ScalarKind::Duration, SchemaType::String, Some("duration") ; "duration")]
#[test_case(ScalarKind::Bytes, SchemaType::String, Some("binary") ; "bytes")]
#[test_case(ScalarKind::Url, SchemaType::String, Some("uri") ; "url")]
fn convert___scalar___maps_type_and_format(
    scalar: ScalarKind,
    expected_type: SchemaType,
    expected_format: Option<&str>,
) {
    let schema = convert(&Program::default(), &Type::scalar(scalar));

    assert_eq!(schema.schema_type, Some(expected_type));
    assert_eq!(schema.format.as_deref(), expected_format);
}

// ============================================================================
// Unions and literals
// ============================================================================

#[test]
fn convert___string_literal_union___string_enum() {
    let schema = convert(
        &Program::default(),
        &Type::string_union(&["active", "inactive"]),
    );

    assert_eq!(
        serde_json::to_value(&schema).unwrap(),
        json!({"type": "string", "enum": ["active", "inactive"]})
    );
}

#[test]
fn convert___number_literal_union___number_enum_with_integers() {
    let ty = Type::union(vec![
        Type::NumberLiteral { value: 1.0 },
        Type::NumberLiteral { value: 2.5 },
    ]);

    let schema = convert(&Program::default(), &ty);

    assert_eq!(schema.schema_type, Some(SchemaType::Number));
    assert_eq!(schema.enum_values, Some(vec![json!(1), json!(2.5)]));
}

#[test]
fn convert___duplicate_literals___deduplicated() {
    let schema = convert(&Program::default(), &Type::string_union(&["a", "a", "b"]));

    assert_eq!(schema.enum_values, Some(vec![json!("a"), json!("b")]));
}

#[test]
fn convert___heterogeneous_union___one_of() {
    let ty = Type::union(vec![Type::string(), Type::scalar(ScalarKind::Int32)]);

    let schema = convert(&Program::default(), &ty);

    assert_eq!(schema.kind(), SchemaKind::Union);
    assert_eq!(schema.one_of.as_ref().map(Vec::len), Some(2));
}

#[test]
fn convert___mixed_literal_union___one_of() {
    let ty = Type::union(vec![
        Type::string_literal("a"),
        Type::BooleanLiteral { value: true },
    ]);

    let schema = convert(&Program::default(), &ty);

    assert_eq!(schema.kind(), SchemaKind::Union);
}

#[test]
fn convert___single_variant_union___unwrapped() {
    let schema = convert(&Program::default(), &Type::union(vec![Type::string()]));

    assert_eq!(schema, SchemaNode::of_type(SchemaType::String));
}

#[test]
fn convert___enum_without_values___member_names() {
    let decl = EnumDecl {
        name: Some("Color".to_string()),
        members: vec![
            EnumMember {
                name: "Red".to_string(),
                value: None,
            },
            EnumMember {
                name: "Green".to_string(),
                value: Some(EnumValue::String("green".to_string())),
            },
        ],
        doc: Some("Paint color".to_string()),
    };

    let schema = convert(&Program::default(), &Type::Enum(decl));

    assert_eq!(schema.schema_type, Some(SchemaType::String));
    assert_eq!(schema.enum_values, Some(vec![json!("Red"), json!("green")]));
    assert_eq!(schema.description.as_deref(), Some("Paint color"));
}

// ============================================================================
// Models
// ============================================================================

#[test]
fn convert___model___required_lists_non_optional_fields() {
    let mut program = Program::default();
    let id = program.add_model(
        Model::named("User")
            .with_property(Property::required("id", Type::string()).with_doc("User id"))
            .with_property(Property::optional("nickname", Type::string())),
    );

    let schema = convert(&program, &Type::model(id));

    assert_eq!(schema.required, Some(vec!["id".to_string()]));
    let properties = schema.properties.unwrap();
    assert_eq!(properties["id"].description.as_deref(), Some("User id"));
    assert!(properties.contains_key("nickname"));
}

#[test]
fn convert___all_optional_fields___required_omitted() {
    let mut program = Program::default();
    let id = program.add_model(
        Model::anonymous().with_property(Property::optional("note", Type::string())),
    );

    let schema = convert(&program, &Type::model(id));

    assert_eq!(schema.required, None);
}

#[test]
fn convert___self_reference___emits_ref_edge() {
    let (program, id) = tree_program();

    let schema = SchemaConverter::new(&program, ConverterOptions::default()).convert_model(id);

    let children = &schema.properties.as_ref().unwrap()["children"];
    assert_eq!(
        children.items.as_ref().unwrap().reference.as_deref(),
        Some("#/components/schemas/TreeNode")
    );
}

#[test]
fn convert___self_reference___records_referenced_model() {
    let (program, id) = tree_program();
    let mut converter = SchemaConverter::new(&program, ConverterOptions::default());

    converter.convert(&Type::model(id));

    assert!(converter.referenced().contains(&id));
}

#[test]
fn convert___mutual_recursion___terminates_with_ref() {
    let mut program = Program::default();
    program.add_model(
        Model::named("Author").with_property(Property::required(
            "books",
            Type::array(Type::model(ModelId(1))),
        )),
    );
    program.add_model(
        Model::named("Book").with_property(Property::required("author", Type::model(ModelId(0)))),
    );

    let schema = convert(&program, &Type::model(ModelId(0)));

    let book = *schema.properties.unwrap()["books"].items.clone().unwrap();
    let author = book.properties.unwrap()["author"].clone();
    assert_eq!(author.referenced_component(), Some("Author"));
}

#[test]
fn convert___inline_models_disabled___named_model_is_ref() {
    let mut program = Program::default();
    let id = program.add_model(Model::named("Address"));
    let mut converter = SchemaConverter::new(
        &program,
        ConverterOptions {
            inline_models: false,
        },
    );

    let schema = converter.convert(&Type::model(id));

    assert_eq!(schema.referenced_component(), Some("Address"));
    assert!(converter.referenced().contains(&id));
}

#[test]
fn convert___inline_models_disabled___anonymous_model_still_inlined() {
    let mut program = Program::default();
    let id = program.add_model(Model::anonymous());
    let mut converter = SchemaConverter::new(
        &program,
        ConverterOptions {
            inline_models: false,
        },
    );

    let schema = converter.convert(&Type::model(id));

    assert_eq!(schema.kind(), SchemaKind::Object);
}

#[test]
fn convert_model___with_base___all_of_ref_and_own_fields() {
    let mut program = Program::default();
    let pet = program.add_model(Model::named("Pet"));
    let dog = program.add_model(
        Model::named("Dog")
            .extends(pet)
            .with_property(Property::required("breed", Type::string())),
    );
    let mut converter = SchemaConverter::new(&program, ConverterOptions::default());

    let schema = converter.convert_model(dog);

    let parts = schema.all_of.unwrap();
    assert_eq!(parts[0].referenced_component(), Some("Pet"));
    assert!(parts[1].properties.as_ref().unwrap().contains_key("breed"));
    assert!(converter.referenced().contains(&pet));
}

#[test]
fn convert_model___indexer___additional_properties() {
    let mut program = Program::default();
    let id = program.add_model(Model::named("Labels").with_indexer(Type::string()));

    let schema = convert(&program, &Type::model(id));

    assert_eq!(
        schema.additional_properties.as_deref(),
        Some(&SchemaNode::of_type(SchemaType::String))
    );
}

#[test]
fn convert___record___object_with_additional_properties() {
    let schema = convert(&Program::default(), &Type::record(Type::boolean()));

    assert_eq!(schema.schema_type, Some(SchemaType::Object));
    assert_eq!(
        schema.additional_properties.as_deref(),
        Some(&SchemaNode::of_type(SchemaType::Boolean))
    );
}

#[test]
fn convert___dangling_model_id___generic_object() {
    let program = Program::default();
    let mut converter = SchemaConverter::new(&program, ConverterOptions::default());

    let schema = converter.convert(&Type::model(ModelId(42)));

    assert_eq!(schema, SchemaNode::of_type(SchemaType::Object));
    assert_eq!(converter.unsupported(), ["model"]);
}

// ============================================================================
// Fallbacks
// ============================================================================

#[test]
fn convert___unsupported___generic_object_and_recorded() {
    let program = Program::default();
    let mut converter = SchemaConverter::new(&program, ConverterOptions::default());

    let schema = converter.convert(&Type::Unsupported);

    assert_eq!(schema, SchemaNode::of_type(SchemaType::Object));
    assert_eq!(converter.unsupported(), ["unsupported"]);
}

#[test]
fn convert___unknown_intrinsic___unconstrained() {
    let schema = convert(
        &Program::default(),
        &Type::Intrinsic {
            name: IntrinsicKind::Unknown,
        },
    );

    assert_eq!(schema.kind(), SchemaKind::Any);
}

#[test]
fn convert___tuple___array_of_element_variants() {
    let ty = Type::Tuple {
        elements: vec![Type::string(), Type::boolean(), Type::string()],
    };

    let schema = convert(&Program::default(), &ty);

    let items = schema.items.unwrap();
    assert_eq!(items.one_of.map(|v| v.len()), Some(2));
}

#[test]
fn component_name___anonymous___indexed() {
    assert_eq!(component_name(&Model::anonymous(), ModelId(3)), "Anonymous3");
    assert_eq!(component_name(&Model::named("User"), ModelId(3)), "User");
}
