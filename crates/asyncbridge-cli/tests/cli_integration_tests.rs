//! Integration tests for the asyncbridge binary.
//!
//! Runs emit, validate and check end to end in temporary directories.

#![allow(non_snake_case)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn asyncbridge(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_asyncbridge"))
        .current_dir(cwd)
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Helper to write a program description with one operation.
fn write_input(dir: &TempDir, annotations: &str) {
    let input = format!(
        r#"{{
  "program": {{
    "root": {{
      "name": "Chat",
      "operations": [{{
        "name": "sendMessage",
        "return_type": {{ "kind": "scalar", "scalar": "string" }}
      }}]
    }}
  }},
  "annotations": {annotations}
}}"#
    );
    fs::write(dir.path().join("input.json"), input).unwrap();
}

// =============================================================================
// Emit
// =============================================================================

mod emit {
    use super::*;

    #[test]
    fn emit___valid_input___writes_yaml_document() {
        let temp = TempDir::new().unwrap();
        write_input(&temp, "{}");

        let output = asyncbridge(temp.path(), &["emit", "--input", "input.json"]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let written = temp.path().join("asyncbridge-output/asyncapi.yaml");
        let text = fs::read_to_string(written).unwrap();
        assert!(text.starts_with("# Generated by asyncbridge"));
        assert!(stdout(&output).contains("Operations: 1"));
    }

    #[test]
    fn emit___json_with_output_dir___writes_json_document() {
        let temp = TempDir::new().unwrap();
        write_input(&temp, "{}");

        let output = asyncbridge(
            temp.path(),
            &["emit", "--input", "input.json", "--file-type", "json", "--output-dir", "out"],
        );

        assert!(output.status.success());
        assert!(temp.path().join("out/asyncapi.json").is_file());
    }

    #[test]
    fn emit___conflicting_roles___fails_without_writing() {
        let temp = TempDir::new().unwrap();
        write_input(
            &temp,
            r#"{ "Chat.sendMessage": [{ "kind": "role", "role": "publish" }, { "kind": "role", "role": "subscribe" }] }"#,
        );

        let output = asyncbridge(temp.path(), &["emit", "--input", "input.json"]);

        assert!(!output.status.success());
        assert!(String::from_utf8_lossy(&output.stderr).contains("Emission failed"));
        assert!(!temp.path().join("asyncbridge-output").exists());
    }

    #[test]
    fn emit___invalid_binding___writes_document_and_reports_drop() {
        let temp = TempDir::new().unwrap();
        write_input(
            &temp,
            r#"{ "Chat.sendMessage": [{ "kind": "protocol", "protocol": "kafka", "channel": { "partitions": -1 } }] }"#,
        );

        let output = asyncbridge(temp.path(), &["emit", "--input", "input.json"]);

        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        assert!(stdout(&output).contains("Bindings dropped: 1"));
        assert!(temp.path().join("asyncbridge-output/asyncapi.yaml").is_file());
    }

    #[test]
    fn emit___missing_input___fails() {
        let temp = TempDir::new().unwrap();

        let output = asyncbridge(temp.path(), &["emit", "--input", "absent.json"]);

        assert!(!output.status.success());
    }
}

// =============================================================================
// Validate
// =============================================================================

mod validate {
    use super::*;

    #[test]
    fn validate___emitted_document___valid() {
        let temp = TempDir::new().unwrap();
        write_input(&temp, "{}");
        let emitted = asyncbridge(temp.path(), &["emit", "--input", "input.json"]);
        assert!(emitted.status.success());

        let output = asyncbridge(
            temp.path(),
            &["validate", "asyncbridge-output/asyncapi.yaml"],
        );

        assert!(output.status.success(), "{}", stdout(&output));
        assert!(stdout(&output).contains("All 1 document(s) are valid!"));
    }

    #[test]
    fn validate___missing_version___reports_required_field() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("broken.json"),
            r#"{ "info": { "title": "T", "version": "1.0.0" } }"#,
        )
        .unwrap();

        let output = asyncbridge(temp.path(), &["validate", "broken.json"]);

        assert!(!output.status.success());
        assert!(stdout(&output).contains("required-field"));
    }
}

// =============================================================================
// Check
// =============================================================================

mod check {
    use super::*;

    #[test]
    fn check___default_config_path___valid() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("asyncbridge.toml"), "[emitter]\ntitle = \"Chat\"\n").unwrap();

        let output = asyncbridge(temp.path(), &["check"]);

        assert!(output.status.success());
        assert!(stdout(&output).contains("Configuration is valid!"));
    }

    #[test]
    fn check___unsupported_template_variable___fails() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("asyncbridge.toml"),
            "[emitter]\noutput-file = \"{home}/asyncapi\"\n",
        )
        .unwrap();

        let output = asyncbridge(temp.path(), &["check"]);

        assert!(!output.status.success());
    }
}
