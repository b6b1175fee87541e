//! Document parsing for YAML and JSON introspection files
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

/// Supported file formats for introspection documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> LoaderResult<Self> {
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            match extension.to_lowercase().as_str() {
                "yaml" | "yml" => Ok(Format::Yaml),
                "json" => Ok(Format::Json),
                _ => Err(LoaderError::unsupported_format(path.to_path_buf())),
            }
        } else {
            Err(LoaderError::unsupported_format(path.to_path_buf()))
        }
    }

    /// Get file extensions for this format
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Format::Yaml => &["yaml", "yml"],
            Format::Json => &["json"],
        }
    }
}

/// Parser turning raw documents into JSON values
#[derive(Debug, Default)]
pub struct SchemaParser;

impl SchemaParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a file, detecting format from extension.
    ///
    /// Files without a `.json`/`.yaml`/`.yml` extension are sniffed as
    /// JSON, then YAML.
    pub fn parse_file(&self, path: &Path) -> LoaderResult<Value> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))?;

        match Format::from_path(path) {
            Ok(format) => self.parse_content(&content, format, path),
            Err(_) => {
                let (value, format) = self.parse_with_fallback(&content, path)?;
                tracing::debug!(path = %path.display(), ?format, "format detected from content");
                Ok(value)
            }
        }
    }

    /// Parse content with explicit format
    pub fn parse_content(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Value> {
        match format {
            Format::Yaml => self.parse_yaml(content, path),
            Format::Json => self.parse_json(content, path),
        }
    }

    /// Parse YAML content
    pub fn parse_yaml(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        // Parse as YAML first so YAML-specific errors keep their location
        let yaml_value: serde_yaml::Value = serde_yaml::from_str(content)
            .map_err(|e| LoaderError::yaml_parse_error(path.to_path_buf(), e))?;

        serde_json::to_value(yaml_value)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Parse JSON content
    pub fn parse_json(&self, content: &str, path: &Path) -> LoaderResult<Value> {
        serde_json::from_str(content)
            .map_err(|e| LoaderError::json_parse_error(path.to_path_buf(), e))
    }

    /// Try the extension's format first, then JSON, then YAML
    pub fn parse_with_fallback(&self, content: &str, path: &Path) -> LoaderResult<(Value, Format)> {
        if let Ok(format) = Format::from_path(path) {
            if let Ok(value) = self.parse_content(content, format, path) {
                return Ok((value, format));
            }
        }

        if let Ok(value) = self.parse_json(content, path) {
            return Ok((value, Format::Json));
        }

        if let Ok(value) = self.parse_yaml(content, path) {
            return Ok((value, Format::Yaml));
        }

        Err(LoaderError::unsupported_format(path.to_path_buf()))
    }

    /// Strip a `{"data": ...}` response envelope if present.
    ///
    /// Raw introspection responses wrap the result in `data`; saved
    /// `__schema` documents do not. A null or missing `data` leaves the
    /// document as it is.
    pub fn unwrap_envelope(&self, value: Value) -> Value {
        match value {
            Value::Object(mut map) if map.get("data").is_some_and(|d| !d.is_null()) => {
                map.remove("data").unwrap_or(Value::Null)
            }
            other => other,
        }
    }

    /// Check the introspection shape before typed decoding.
    ///
    /// Errors name the offending location as a JSON path so a broken
    /// document can be fixed without guessing.
    pub fn validate_basic_structure(&self, value: &Value, path: &Path) -> LoaderResult<()> {
        let invalid = |location: String, reason: &str| {
            LoaderError::validation_error(path.to_path_buf(), location, reason)
        };

        let root = value
            .as_object()
            .ok_or_else(|| invalid("$".into(), "document must be an object"))?;

        let schema = root
            .get("__schema")
            .ok_or_else(|| invalid("$".into(), "missing '__schema'"))?
            .as_object()
            .ok_or_else(|| invalid("$.__schema".into(), "'__schema' must be an object"))?;

        let types = schema
            .get("types")
            .ok_or_else(|| invalid("$.__schema".into(), "missing 'types'"))?
            .as_array()
            .ok_or_else(|| invalid("$.__schema.types".into(), "'types' must be an array"))?;

        let mut seen = HashSet::new();
        for (index, ty) in types.iter().enumerate() {
            let location = format!("$.__schema.types[{}]", index);
            let ty = ty
                .as_object()
                .ok_or_else(|| invalid(location.clone(), "type must be an object"))?;

            if !ty.get("kind").is_some_and(Value::is_string) {
                return Err(invalid(location, "type is missing 'kind'"));
            }

            let name = ty
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| invalid(location.clone(), "type is missing 'name'"))?;

            if !seen.insert(name) {
                return Err(invalid(location, &format!("duplicate type name '{}'", name)));
            }
        }

        if let Some(directives) = schema.get("directives") {
            if !directives.is_array() && !directives.is_null() {
                return Err(invalid(
                    "$.__schema.directives".into(),
                    "'directives' must be an array",
                ));
            }
        }

        Ok(())
    }
}
