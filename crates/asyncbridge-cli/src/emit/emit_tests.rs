#![allow(non_snake_case)]

use super::*;

fn args() -> EmitArgs {
    EmitArgs {
        input: "input.json".to_string(),
        ..EmitArgs::default()
    }
}

// resolve_options tests

#[test]
fn resolve_options___no_config_file___defaults() {
    let temp = tempfile::tempdir().unwrap();

    let options = resolve_options(&args(), temp.path()).unwrap();

    assert_eq!(options, EmitterOptions::default());
}

#[test]
fn resolve_options___config_in_cwd___loaded() {
    let temp = tempfile::tempdir().unwrap();
    std::fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "[emitter]\ntitle = \"Orders\"\nfile-type = \"json\"\n",
    )
    .unwrap();

    let options = resolve_options(&args(), temp.path()).unwrap();

    assert_eq!(options.title, "Orders");
    assert_eq!(options.file_type, FileType::Json);
}

#[test]
fn resolve_options___flags___override_config() {
    let temp = tempfile::tempdir().unwrap();
    let config = temp.path().join("custom.toml");
    std::fs::write(&config, "[emitter]\nfile-type = \"json\"\n").unwrap();
    let args = EmitArgs {
        config: Some(config.display().to_string()),
        file_type: Some(FileType::Yaml),
        output_file: Some("{cmd}/api".to_string()),
        strict: true,
        log_level: Some("debug".to_string()),
        ..args()
    };

    let options = resolve_options(&args, temp.path()).unwrap();

    assert_eq!(options.file_type, FileType::Yaml);
    assert_eq!(options.output_file, "{cmd}/api");
    assert!(options.strict);
    assert_eq!(options.log_level, "debug");
}

#[test]
fn resolve_options___unsupported_template_variable___error() {
    let temp = tempfile::tempdir().unwrap();
    let args = EmitArgs {
        output_file: Some("{home}/api".to_string()),
        ..args()
    };

    let result = resolve_options(&args, temp.path());

    assert!(result.is_err());
}

#[test]
fn resolve_options___missing_explicit_config___error() {
    let temp = tempfile::tempdir().unwrap();
    let args = EmitArgs {
        config: Some(temp.path().join("absent.toml").display().to_string()),
        ..args()
    };

    let err = resolve_options(&args, temp.path()).unwrap_err();

    assert!(err.to_string().contains("Failed to load configuration"));
}

// EmitInput tests

#[test]
fn EmitInput___from_file___annotations_optional() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("input.json");
    std::fs::write(&path, r#"{ "program": { "root": { "name": "Chat" } } }"#).unwrap();

    let input = EmitInput::from_file(&path).unwrap();

    assert_eq!(input.program.root.name, "Chat");
    assert_eq!(input.annotations, AnnotationState::new());
}

#[test]
fn EmitInput___from_file___malformed_json_error_names_file() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{").unwrap();

    let err = EmitInput::from_file(&path).unwrap_err();

    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn absolute___relative_dir___joined_to_cwd() {
    assert_eq!(absolute(Path::new("/work"), "out"), PathBuf::from("/work/out"));
    assert_eq!(absolute(Path::new("/work"), "/tmp/out"), PathBuf::from("/tmp/out"));
}
