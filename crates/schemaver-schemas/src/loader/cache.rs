//! Caching layer so repeated loads of the same file skip parsing
//!
//! Copyright (c) 2025 Schemaver Team
//! Licensed under the Apache-2.0 license

use crate::loader::error::{LoaderError, LoaderResult};
use schemaver_core::Schema;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Cached schema with the file state it was built from
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub schema: Schema,
    pub cached_at: SystemTime,
    /// File modification time when cached
    pub file_mtime: SystemTime,
    pub file_path: PathBuf,
}

impl CacheEntry {
    pub fn new(schema: Schema, file_path: PathBuf, file_mtime: SystemTime) -> Self {
        Self {
            schema,
            cached_at: SystemTime::now(),
            file_mtime,
            file_path,
        }
    }

    /// Check if this cache entry is still valid
    pub fn is_valid(&self, current_mtime: SystemTime, max_age: Option<Duration>) -> bool {
        if current_mtime > self.file_mtime {
            return false;
        }

        if let Some(max_age) = max_age {
            if let Ok(elapsed) = self.cached_at.elapsed() {
                if elapsed > max_age {
                    return false;
                }
            }
        }

        true
    }
}

/// Configuration for cache behavior
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries before the least recently used is evicted
    pub max_entries: usize,
    pub max_age: Option<Duration>,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            max_age: None,
            enabled: true,
        }
    }
}

/// In-memory cache of loaded schemas keyed by canonical path
#[derive(Debug)]
pub struct SchemaCache {
    entries: HashMap<PathBuf, CacheEntry>,
    config: CacheConfig,
    access_order: Vec<PathBuf>, // LRU order, most recent last
}

impl SchemaCache {
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            access_order: Vec::new(),
        }
    }

    /// Get a cached schema if present and the file has not changed since
    pub fn get(&mut self, path: &Path) -> LoaderResult<Option<Schema>> {
        if !self.config.enabled {
            return Ok(None);
        }

        let canonical_path = canonicalize(path)?;

        let entry_valid = match self.entries.get(&canonical_path) {
            Some(entry) => entry.is_valid(modified_time(path)?, self.config.max_age),
            None => false,
        };

        if entry_valid {
            self.update_access_order(&canonical_path);
            Ok(self.entries.get(&canonical_path).map(|entry| entry.schema.clone()))
        } else {
            self.remove_path(&canonical_path);
            Ok(None)
        }
    }

    pub fn put(&mut self, path: &Path, schema: Schema) -> LoaderResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let canonical_path = canonicalize(path)?;
        let entry = CacheEntry::new(schema, canonical_path.clone(), modified_time(path)?);

        if !self.entries.contains_key(&canonical_path) && self.entries.len() >= self.config.max_entries {
            self.evict_lru();
        }

        self.entries.insert(canonical_path.clone(), entry);
        self.update_access_order(&canonical_path);

        Ok(())
    }

    pub fn remove(&mut self, path: &Path) -> LoaderResult<bool> {
        let canonical_path = canonicalize(path)?;
        let removed = self.entries.remove(&canonical_path).is_some();
        self.access_order.retain(|p| p != &canonical_path);
        Ok(removed)
    }

    pub fn contains(&self, path: &Path) -> LoaderResult<bool> {
        Ok(self.entries.contains_key(&canonicalize(path)?))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.access_order.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_lru(&mut self) {
        if let Some(oldest_path) = self.access_order.first().cloned() {
            tracing::trace!(path = %oldest_path.display(), "evicting cached schema");
            self.remove_path(&oldest_path);
        }
    }

    fn update_access_order(&mut self, path: &PathBuf) {
        self.access_order.retain(|p| p != path);
        self.access_order.push(path.clone());
    }

    fn remove_path(&mut self, path: &PathBuf) {
        self.entries.remove(path);
        self.access_order.retain(|p| p != path);
    }
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

fn canonicalize(path: &Path) -> LoaderResult<PathBuf> {
    path.canonicalize()
        .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))
}

fn modified_time(path: &Path) -> LoaderResult<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|e| LoaderError::io_error(path.to_path_buf(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn schema_with(name: &str) -> Schema {
        Schema::builder().scalar(name).build()
    }

    #[test]
    fn test_cache_entry_validity() {
        let mtime = SystemTime::now();
        let entry = CacheEntry::new(schema_with("String"), PathBuf::from("schema.json"), mtime);

        assert!(entry.is_valid(mtime, None));
        assert!(!entry.is_valid(mtime + Duration::from_secs(1), None));

        std::thread::sleep(Duration::from_millis(2));
        assert!(!entry.is_valid(mtime, Some(Duration::from_millis(1))));
    }

    #[test]
    fn test_schema_cache_operations() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.json");
        fs::write(&file_path, "{}").unwrap();

        let mut cache = SchemaCache::new();
        assert!(cache.get(&file_path)?.is_none());

        cache.put(&file_path, schema_with("String"))?;
        assert_eq!(cache.get(&file_path)?, Some(schema_with("String")));
        assert!(cache.contains(&file_path)?);

        // the same file through a different spelling hits the same entry
        let indirect = dir.path().join(".").join("schema.json");
        assert!(cache.contains(&indirect)?);

        assert!(cache.remove(&file_path)?);
        assert!(cache.get(&file_path)?.is_none());
        Ok(())
    }

    #[test]
    fn test_cache_lru_eviction() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let mut cache = SchemaCache::with_config(CacheConfig {
            max_entries: 2,
            max_age: None,
            enabled: true,
        });

        let files: Vec<_> = (1..=3).map(|i| dir.path().join(format!("s{i}.json"))).collect();
        for file in &files {
            fs::write(file, "{}").unwrap();
        }

        cache.put(&files[0], schema_with("A"))?;
        cache.put(&files[1], schema_with("B"))?;
        cache.put(&files[2], schema_with("C"))?;

        assert!(!cache.contains(&files[0])?);
        assert!(cache.contains(&files[1])?);
        assert!(cache.contains(&files[2])?);
        assert_eq!(cache.len(), 2);
        Ok(())
    }

    #[test]
    fn test_disabled_cache() -> LoaderResult<()> {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("schema.json");
        fs::write(&file_path, "{}").unwrap();

        let mut cache = SchemaCache::with_config(CacheConfig {
            enabled: false,
            ..CacheConfig::default()
        });

        cache.put(&file_path, schema_with("String"))?;
        assert!(cache.get(&file_path)?.is_none());
        assert!(cache.is_empty());
        Ok(())
    }
}
