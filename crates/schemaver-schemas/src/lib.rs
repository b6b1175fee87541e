//! Schemaver Schemas - introspection loading for the comparison engine
//!
//! Turns GraphQL introspection results into [`schemaver_core::Schema`]
//! snapshots. Both the bare `{"__schema": ...}` form and the
//! `{"data": {"__schema": ...}}` response envelope are accepted, in JSON
//! or YAML.
//!
//! ## Quick Start
//!
//! ```rust
//! use schemaver_schemas::{load_schema_str, Format};
//!
//! let schema = load_schema_str(
//!     r#"{"data": {"__schema": {"types": [{"kind": "SCALAR", "name": "String"}]}}}"#,
//!     Format::Json,
//! )?;
//! assert!(schema.get_type("String").is_some());
//! # Ok::<(), schemaver_schemas::LoaderError>(())
//! ```

pub mod introspection;
pub mod loader;

pub use introspection::{IntrospectionDocument, DEFAULT_DEPRECATION_REASON};
pub use loader::{Format, LoaderConfig, LoaderError, LoaderResult, SchemaLoader};

use schemaver_core::Schema;
use std::path::Path;

/// Load one schema file without keeping a cache around
pub fn load_schema_file(path: &Path) -> LoaderResult<Schema> {
    SchemaLoader::with_config(LoaderConfig {
        cache: loader::CacheConfig {
            enabled: false,
            ..Default::default()
        },
        ..Default::default()
    })
    .load_schema(path)
}

/// Load a schema from in-memory content
pub fn load_schema_str(content: &str, format: Format) -> LoaderResult<Schema> {
    SchemaLoader::new().load_str(content, format, Path::new("<memory>"))
}
