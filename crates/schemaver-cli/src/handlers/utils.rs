//! Shared utilities for command handlers

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use schemaver_core::Schema;
use schemaver_schemas::SchemaLoader;
use std::path::Path;

/// Load an introspection file, reporting a missing file as such
pub fn load_schema(loader: &mut SchemaLoader, path: &Path) -> Result<Schema> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let _timer = Timer::with_details("load_schema", &path.display().to_string());
    let schema = loader.load_schema(path)?;
    tracing::debug!(
        path = %path.display(),
        types = schema.types.len(),
        directives = schema.directives.len(),
        "schema loaded"
    );
    Ok(schema)
}

/// Version of the previous schema: `--current`, else the configured default
pub fn resolve_current_version(current: Option<&str>, config: &Config) -> Result<String> {
    match current {
        Some(version) if version.trim().is_empty() => {
            Err(Error::invalid_args("--current must not be empty"))
        }
        Some(version) => Ok(version.to_string()),
        None => Ok(config.default_version.clone()),
    }
}
