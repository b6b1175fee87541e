//! Schema loader tying parsing, validation, conversion and caching together
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use crate::introspection::IntrospectionDocument;
use crate::loader::{
    cache::{CacheConfig, SchemaCache},
    error::LoaderResult,
    parser::{Format, SchemaParser},
};
use schemaver_core::Schema;
use serde_json::Value;
use std::path::Path;

/// Configuration for schema loader behavior
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    pub cache: CacheConfig,
    /// Check the introspection shape before typed decoding
    pub validate_basic_structure: bool,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            validate_basic_structure: true,
        }
    }
}

/// Loads introspection files into [`Schema`] snapshots
#[derive(Debug)]
pub struct SchemaLoader {
    config: LoaderConfig,
    cache: SchemaCache,
    parser: SchemaParser,
}

impl SchemaLoader {
    /// Create a new schema loader with default configuration
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    pub fn with_config(config: LoaderConfig) -> Self {
        Self {
            cache: SchemaCache::with_config(config.cache.clone()),
            parser: SchemaParser::new(),
            config,
        }
    }

    /// Load a schema file; unknown extensions are detected from content
    pub fn load_schema(&mut self, path: &Path) -> LoaderResult<Schema> {
        if let Some(schema) = self.cache.get(path)? {
            tracing::debug!(path = %path.display(), "schema cache hit");
            return Ok(schema);
        }

        let value = self.parser.parse_file(path)?;
        let schema = self.load_value(value, path)?;

        self.cache.put(path, schema.clone())?;
        Ok(schema)
    }

    /// Load a schema from in-memory content; `path` only labels errors
    pub fn load_str(&self, content: &str, format: Format, path: &Path) -> LoaderResult<Schema> {
        let value = self.parser.parse_content(content, format, path)?;
        self.load_value(value, path)
    }

    /// Convert an already parsed introspection result
    pub fn load_value(&self, value: Value, path: &Path) -> LoaderResult<Schema> {
        let value = self.parser.unwrap_envelope(value);

        if self.config.validate_basic_structure {
            self.parser.validate_basic_structure(&value, path)?;
        }

        IntrospectionDocument::from_value(value, path)?.into_schema(path)
    }

    /// Reload a schema, bypassing cache
    pub fn reload_schema(&mut self, path: &Path) -> LoaderResult<Schema> {
        self.cache.remove(path)?;
        self.load_schema(path)
    }

    pub fn is_cached(&self, path: &Path) -> LoaderResult<bool> {
        self.cache.contains(path)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl Default for SchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::error::LoaderError;
    use std::fs;
    use tempfile::tempdir;

    const MINIMAL: &str = r#"{
  "__schema": {
    "types": [
      {"kind": "SCALAR", "name": "String"},
      {"kind": "OBJECT", "name": "Query", "fields": [
        {"name": "hero", "args": [], "type": {"kind": "SCALAR", "name": "String"}, "isDeprecated": false}
      ]}
    ],
    "directives": []
  }
}"#;

    #[test]
    fn test_schema_loader_creation() {
        let loader = SchemaLoader::new();
        assert!(loader.config().validate_basic_structure);
        assert!(loader.config().cache.enabled);
    }

    #[test]
    fn test_load_json_file() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.json");
        fs::write(&file_path, MINIMAL).unwrap();

        let schema = SchemaLoader::new().load_schema(&file_path)?;
        assert!(schema.get_type("Query").is_some());
        assert!(schema.get_type("String").is_some());
        Ok(())
    }

    #[test]
    fn test_load_yaml_with_envelope() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.yml");
        fs::write(
            &file_path,
            r#"
data:
  __schema:
    types:
      - kind: ENUM
        name: Episode
        enumValues:
          - name: NEWHOPE
          - name: JEDI
"#,
        )
        .unwrap();

        let schema = SchemaLoader::new().load_schema(&file_path)?;
        assert_eq!(schema.enum_types()[0].values.len(), 2);
        Ok(())
    }

    #[test]
    fn test_caching_behavior() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.json");
        fs::write(&file_path, MINIMAL).unwrap();

        let mut loader = SchemaLoader::new();
        assert!(!loader.is_cached(&file_path)?);

        let first = loader.load_schema(&file_path)?;
        assert!(loader.is_cached(&file_path)?);
        assert_eq!(loader.load_schema(&file_path)?, first);

        assert_eq!(loader.reload_schema(&file_path)?, first);

        loader.clear_cache();
        assert!(!loader.is_cached(&file_path)?);
        Ok(())
    }

    #[test]
    fn test_validation_can_be_disabled() {
        let loader = SchemaLoader::with_config(LoaderConfig {
            validate_basic_structure: false,
            ..LoaderConfig::default()
        });

        // typed decoding still rejects the document, just without a location
        let err = loader
            .load_str("{}", Format::Json, Path::new("empty.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::JsonParseError { .. }));

        let err = SchemaLoader::new()
            .load_str("{}", Format::Json, Path::new("empty.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::ValidationError { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = SchemaLoader::new()
            .load_schema(Path::new("/nonexistent/schema.json"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::IoError { .. }));
    }

    #[test]
    fn test_unknown_extension_is_detected_from_content() -> LoaderResult<()> {
        let dir = tempdir().unwrap();

        let json_path = dir.path().join("schema.txt");
        fs::write(&json_path, MINIMAL).unwrap();
        let schema = SchemaLoader::new().load_schema(&json_path)?;
        assert!(schema.get_type("Query").is_some());

        let yaml_path = dir.path().join("introspection");
        fs::write(
            &yaml_path,
            "__schema:\n  types:\n    - kind: SCALAR\n      name: String\n",
        )
        .unwrap();
        let schema = SchemaLoader::new().load_schema(&yaml_path)?;
        assert!(schema.get_type("String").is_some());
        Ok(())
    }

    #[test]
    fn test_unsupported_content() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.graphql");
        fs::write(&file_path, "key: [unclosed").unwrap();

        let err = SchemaLoader::new().load_schema(&file_path).unwrap_err();
        assert!(matches!(err, LoaderError::UnsupportedFormat { .. }));
    }
}
