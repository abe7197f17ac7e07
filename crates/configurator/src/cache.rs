//! Local cache of last-known parameter values.
//!
//! The file holds a JSON list of `{"Name", "Value"}` objects and is always
//! rewritten in full. A missing file is an empty cache.

use crate::types::CacheEntry;
use paramconf_core::{AppError, AppResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Handle to the cache file.
#[derive(Debug, Clone)]
pub struct CacheFile {
    path: PathBuf,
}

impl CacheFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every cached entry; an absent file yields an empty list.
    pub fn load(&self) -> AppResult<Vec<CacheEntry>> {
        if !self.path.exists() {
            tracing::debug!("No cache file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            AppError::Cache(format!("Failed to read cache {:?}: {}", self.path, e))
        })?;

        let entries: Vec<CacheEntry> = serde_json::from_str(&contents).map_err(|e| {
            AppError::Cache(format!("Failed to parse cache {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Loaded {} cached entries", entries.len());
        Ok(entries)
    }

    /// Replace the cache contents with `entries`.
    pub fn write(&self, entries: &[CacheEntry]) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Cache(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_string(entries)?;

        fs::write(&self.path, json).map_err(|e| {
            AppError::Cache(format!("Failed to write cache {:?}: {}", self.path, e))
        })?;

        tracing::debug!("Wrote {} entries to {:?}", entries.len(), self.path);
        Ok(())
    }

    /// Delete the cache file.
    ///
    /// # Returns
    /// `true` if a file was removed
    pub fn remove(&self) -> AppResult<bool> {
        if !self.path.exists() {
            return Ok(false);
        }

        fs::remove_file(&self.path).map_err(|e| {
            AppError::Cache(format!("Failed to remove cache {:?}: {}", self.path, e))
        })?;

        Ok(true)
    }
}
