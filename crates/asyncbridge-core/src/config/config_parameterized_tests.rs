#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized file type parsing
// ============================================================================

#[test_case("json", FileType::Json)]
#[test_case("JSON", FileType::Json)]
#[test_case("yaml", FileType::Yaml)]
#[test_case("yml", FileType::Yaml)]
fn FileType___from_str___parses(input: &str, expected: FileType) {
    assert_eq!(input.parse::<FileType>().unwrap(), expected);
}

#[test_case(FileType::Json, "json", true)]
#[test_case(FileType::Json, "yaml", false)]
#[test_case(FileType::Yaml, "yaml", true)]
#[test_case(FileType::Yaml, "YML", true)]
#[test_case(FileType::Yaml, "json", false)]
fn FileType___matches_extension___checked(file_type: FileType, extension: &str, expected: bool) {
    assert_eq!(file_type.matches_extension(extension), expected);
}

// ============================================================================
// Parameterized validation failures
// ============================================================================

#[test_case(r#"{"title": ""}"#, "title")]
#[test_case(r#"{"version": ""}"#, "version")]
#[test_case(r#"{"version": "1"}"#, "version")]
#[test_case(r#"{"log-level": "verbose"}"#, "log-level")]
#[test_case(r#"{"output-file": "{home}/asyncapi"}"#, "output-file")]
#[test_case(r#"{"output-file": "{output-dir/asyncapi"}"#, "output-file")]
fn EmitterOptions___validate___rejects_field(json: &str, field_name: &str) {
    let options = EmitterOptions::from_json(json.as_bytes()).unwrap();

    let err = options.validate().unwrap_err();

    match err {
        ConfigError::InvalidValue { field, .. } => assert_eq!(field, field_name),
        other => panic!("unexpected error: {other}"),
    }
}

#[test_case("{cmd}/asyncapi")]
#[test_case("{project-root}/docs/{emitter-name}")]
#[test_case("{output-dir}/asyncapi")]
#[test_case("docs/asyncapi")]
fn EmitterOptions___validate___accepts_output_file(template: &str) {
    let options = EmitterOptions {
        output_file: template.to_string(),
        ..EmitterOptions::default()
    };

    assert!(options.validate().is_ok());
}
