//! Spec loading and decoding
//!
//! A spec is decoded as JSON first. When that fails and YAML support is
//! available, the same text is decoded as YAML. Reading the file or stream is
//! a separate step that fails with its own errors before any decoding starts.

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::SpecError;

/// Optional input formats available to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formats {
    /// YAML fallback decoding is available
    pub yaml: bool,
}

impl Formats {
    /// Detect the formats compiled into this build
    pub fn detect() -> Self {
        Self {
            yaml: cfg!(feature = "yaml"),
        }
    }

    /// JSON only
    pub fn json_only() -> Self {
        Self { yaml: false }
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self::detect()
    }
}

/// Decode spec text as JSON, falling back to YAML
///
/// `source` names the input in error messages (a path or "stdin").
pub fn parse_spec_content(content: &str, source: &str, formats: Formats) -> Result<Value, SpecError> {
    let json_error = match serde_json::from_str::<Value>(content) {
        Ok(value) => {
            debug!(source, "decoded spec as JSON");
            return Ok(value);
        }
        Err(e) => e,
    };

    if !formats.yaml {
        return Err(SpecError::InvalidJson {
            source_name: source.to_string(),
            json_error: json_error.to_string(),
        });
    }

    debug!(source, %json_error, "JSON decoding failed, trying YAML");
    parse_yaml(content, source, json_error)
}

#[cfg(feature = "yaml")]
fn parse_yaml(content: &str, source: &str, json_error: serde_json::Error) -> Result<Value, SpecError> {
    match serde_yaml::from_str::<Value>(content) {
        Ok(value) => {
            debug!(source, "decoded spec as YAML");
            Ok(value)
        }
        Err(yaml_error) => Err(SpecError::Unparseable {
            source_name: source.to_string(),
            json_error: json_error.to_string(),
            yaml_location: yaml_error
                .location()
                .map(|location| (location.line(), location.column())),
            yaml_error: yaml_error.to_string(),
        }),
    }
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(_content: &str, source: &str, json_error: serde_json::Error) -> Result<Value, SpecError> {
    Err(SpecError::InvalidJson {
        source_name: source.to_string(),
        json_error: json_error.to_string(),
    })
}

/// Load and decode a spec file
pub fn load_spec_from_file(path: &Path, formats: Formats) -> Result<Value, SpecError> {
    let display = path.display().to_string();

    if !path.exists() {
        return Err(SpecError::FileNotFound { path: display });
    }

    let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
        source_name: display.clone(),
        source,
    })?;

    let is_yaml_file = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml_file && !formats.yaml {
        return Err(SpecError::YamlUnsupported { path: display });
    }

    parse_spec_content(&content, &display, formats)
}

/// Load and decode a spec from a stream such as stdin
pub fn load_spec_from_reader<R: Read>(mut reader: R, formats: Formats) -> Result<Value, SpecError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| SpecError::Read {
            source_name: "stdin".to_string(),
            source,
        })?;

    if content.trim().is_empty() {
        return Err(SpecError::EmptyInput);
    }

    parse_spec_content(&content, "stdin", formats)
}
