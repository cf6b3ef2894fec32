//! Document codecs for JSON and YAML output

use asyncbridge_core::{AsyncApiDocument, FileType};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Write as _;
use thiserror::Error;

/// Top-level extension key carrying generation provenance in JSON output
pub const PROVENANCE_KEY: &str = "x-generated-from-source";

/// Name written into provenance blocks
pub const GENERATOR: &str = "asyncbridge";

/// Errors that can occur while rendering or parsing a document
#[derive(Error, Debug)]
pub enum CodecError {
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            CodecError::Deserialization(err.to_string())
        } else {
            CodecError::Serialization(err.to_string())
        }
    }
}

/// Where a document came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub generator: String,
    pub generator_version: String,
    pub source_files: Vec<String>,
    pub operation_count: usize,
}

impl Provenance {
    pub fn new(source_files: Vec<String>, operation_count: usize) -> Self {
        Self {
            generator: GENERATOR.to_string(),
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
            source_files,
            operation_count,
        }
    }
}

/// Renders documents to text and parses them back
pub trait DocumentCodec: Send + Sync {
    /// Render a document with its provenance
    fn render(&self, document: &AsyncApiDocument, provenance: &Provenance)
    -> Result<String, CodecError>;

    /// Parse a document, ignoring provenance
    fn parse(&self, text: &str) -> Result<AsyncApiDocument, CodecError>;

    fn file_type(&self) -> FileType;

    /// Get the content type for this codec
    fn content_type(&self) -> &'static str;
}

/// Pretty-printed JSON with provenance under [`PROVENANCE_KEY`]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn render(
        &self,
        document: &AsyncApiDocument,
        provenance: &Provenance,
    ) -> Result<String, CodecError> {
        let mut value = serde_json::to_value(document)?;
        let Value::Object(fields) = &mut value else {
            return Err(CodecError::InvalidFormat(
                "document did not serialize to an object".to_string(),
            ));
        };
        fields.insert(PROVENANCE_KEY.to_string(), serde_json::to_value(provenance)?);
        let mut text = serde_json::to_string_pretty(&value)?;
        text.push('\n');
        Ok(text)
    }

    fn parse(&self, text: &str) -> Result<AsyncApiDocument, CodecError> {
        serde_json::from_str(text).map_err(Into::into)
    }

    fn file_type(&self) -> FileType {
        FileType::Json
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}

/// YAML preceded by a `#` provenance comment block
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl YamlCodec {
    fn header(provenance: &Provenance) -> String {
        let mut header = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            header,
            "# Generated by {} {}",
            provenance.generator, provenance.generator_version
        );
        if !provenance.source_files.is_empty() {
            let _ = writeln!(header, "# Source files:");
            for file in &provenance.source_files {
                let _ = writeln!(header, "#   - {file}");
            }
        }
        let _ = writeln!(header, "# Operations: {}", provenance.operation_count);
        header
    }
}

impl DocumentCodec for YamlCodec {
    fn render(
        &self,
        document: &AsyncApiDocument,
        provenance: &Provenance,
    ) -> Result<String, CodecError> {
        let body = serde_yaml::to_string(document)
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
        Ok(format!("{}{body}", Self::header(provenance)))
    }

    fn parse(&self, text: &str) -> Result<AsyncApiDocument, CodecError> {
        serde_yaml::from_str(text).map_err(|e| CodecError::Deserialization(e.to_string()))
    }

    fn file_type(&self) -> FileType {
        FileType::Yaml
    }

    fn content_type(&self) -> &'static str {
        "application/yaml"
    }
}

/// Codec for an output file type
pub fn codec_for(file_type: FileType) -> Box<dyn DocumentCodec> {
    match file_type {
        FileType::Json => Box::new(JsonCodec),
        FileType::Yaml => Box::new(YamlCodec),
    }
}
