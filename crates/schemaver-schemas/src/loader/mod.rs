//! Loading of introspection files
//!
//! This module reads GraphQL introspection results from disk or memory:
//! - YAML and JSON parsing with format detection
//! - `data` envelope unwrapping and basic structure validation
//! - In-memory caching keyed by canonical path
//!
//! # Example Usage
//!
//! ```no_run
//! use schemaver_schemas::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let mut loader = SchemaLoader::new();
//! let schema = loader.load_schema(Path::new("schema.json"))?;
//! println!("Loaded {} types", schema.types.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod error;
pub mod parser;
pub mod schema_loader;

pub use cache::{CacheConfig, CacheEntry, SchemaCache};
pub use error::{LoaderError, LoaderResult};
pub use parser::{Format, SchemaParser};
pub use schema_loader::{LoaderConfig, SchemaLoader};
