//! Emitter and extension configuration types

use crate::LogLevel;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Default configuration file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "asyncbridge.toml";

/// Variables accepted in an output path template.
pub const PATH_VARIABLES: [&str; 4] = ["cmd", "project-root", "emitter-name", "output-dir"];

/// Output document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Json,
    #[default]
    Yaml,
}

impl FileType {
    /// File extension written for this format
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Json => "json",
            FileType::Yaml => "yaml",
        }
    }

    /// Whether `extension` already names this format
    pub fn matches_extension(self, extension: &str) -> bool {
        let extension = extension.to_ascii_lowercase();
        match self {
            FileType::Json => extension == "json",
            FileType::Yaml => extension == "yaml" || extension == "yml",
        }
    }
}

impl FromStr for FileType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileType::Json),
            "yaml" | "yml" => Ok(FileType::Yaml),
            other => Err(ConfigError::invalid(
                "file-type",
                format!("expected 'json' or 'yaml', got '{other}'"),
            )),
        }
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Emitter options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct EmitterOptions {
    /// Output path template, without extension
    pub output_file: String,

    pub file_type: FileType,

    /// `info.title`
    pub title: String,

    /// `info.version`
    pub version: String,

    /// `info.description`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Report unsupported types as warnings
    pub strict: bool,

    /// Attach Kafka channel bindings to topic-shaped addresses without a protocol
    pub infer_kafka_bindings: bool,

    /// Inline named models at their first use instead of always emitting `$ref`
    pub inline_models: bool,

    /// Run the documentation lint extension after emission
    pub lint_documentation: bool,

    pub log_level: String,
}

impl Default for EmitterOptions {
    fn default() -> Self {
        Self {
            output_file: "{output-dir}/asyncapi".to_string(),
            file_type: FileType::Yaml,
            title: "AsyncAPI".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            strict: false,
            infer_kafka_bindings: true,
            inline_models: true,
            lint_documentation: false,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    #[serde(default)]
    emitter: EmitterOptions,
}

impl EmitterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create options from JSON bytes; empty input yields defaults
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Parse the `[emitter]` table of a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(text)?;
        Ok(file.emitter)
    }

    /// Load and validate options from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let options = Self::from_toml_str(&text)?;
        options.validate()?;
        Ok(options)
    }

    /// Parsed log level
    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        self.log_level.parse()
    }

    /// Check every field for allowed values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::invalid("title", "must not be empty"));
        }
        if self.version.trim().is_empty() {
            return Err(ConfigError::invalid("version", "must not be empty"));
        }
        if !self.version.contains('.') {
            return Err(ConfigError::invalid(
                "version",
                format!("'{}' is not a dotted version", self.version),
            ));
        }
        self.log_level()?;

        let variables = template_variables(&self.output_file)
            .map_err(|reason| ConfigError::invalid("output-file", reason))?;
        if let Some(unknown) = variables.iter().find(|v| !PATH_VARIABLES.contains(*v)) {
            return Err(ConfigError::invalid(
                "output-file",
                format!("unsupported variable '{{{unknown}}}'"),
            ));
        }
        Ok(())
    }
}

/// Names of the `{variable}` placeholders in a path template, in order.
///
/// Fails on an unbalanced or empty brace pair.
pub fn template_variables(template: &str) -> Result<Vec<&str>, String> {
    let mut variables = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find(['{', '}']) {
        if rest[open..].starts_with('}') {
            return Err(format!("unbalanced '}}' in '{template}'"));
        }
        let after = &rest[open + 1..];
        let close = after
            .find(['{', '}'])
            .filter(|&i| after[i..].starts_with('}'))
            .ok_or_else(|| format!("unbalanced '{{' in '{template}'"))?;
        let name = &after[..close];
        if name.is_empty() {
            return Err(format!("empty variable in '{template}'"));
        }
        variables.push(name);
        rest = &after[close + 1..];
    }

    Ok(variables)
}

/// Configuration handed to an extension during initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionConfig {
    /// Extension-specific configuration data
    #[serde(default)]
    pub data: serde_json::Value,

    /// Whether the extension runs at all
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionConfig {
    pub fn new() -> Self {
        Self {
            data: serde_json::Value::Null,
            enabled: true,
        }
    }

    /// Create configuration from JSON bytes
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::new());
        }
        serde_json::from_slice(bytes)
    }

    /// Get a typed value from the configuration data
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Set a value in the configuration data
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(value)?;
        match &mut self.data {
            serde_json::Value::Object(map) => {
                map.insert(key.to_string(), value);
            }
            other => {
                let mut map = serde_json::Map::new();
                map.insert(key.to_string(), value);
                *other = serde_json::Value::Object(map);
            }
        }
        Ok(())
    }
}

/// Descriptive information about an extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionMetadata {
    pub name: String,

    /// Extension version (semver)
    pub version: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl ExtensionMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            description: None,
        }
    }
}


#[cfg(test)]
#[path = "config/config_parameterized_tests.rs"]
mod config_parameterized_tests;
