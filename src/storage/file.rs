// SPDX-License-Identifier: MPL-2.0
//! File-backed key-value store.
//!
//! Values live in a flat TOML table (`key = "value"`) so the file stays easy
//! to inspect and hand-edit. The whole table is read on every access; the
//! store holds a handful of keys, so there is no caching layer.
//!
//! # Path Resolution
//!
//! The store file location can be customized for testing or portable deployments:
//! 1. Use [`FileStore::new`] with an explicit file path
//! 2. Use [`FileStore::in_data_dir`] with an optional directory override
//! 3. Set `HASKELLITO_DATA_DIR` environment variable
//! 4. Falls back to platform-specific data directory

use super::KeyValueStore;
use crate::app::paths;
use crate::error::StorageError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Store file name within the app data directory.
pub const STORE_FILE: &str = "local_storage.toml";

/// Key-value store persisted as a TOML file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store in the application data directory.
    ///
    /// Returns `None` when no data directory can be determined.
    #[must_use]
    pub fn in_data_dir(base_dir: Option<PathBuf>) -> Option<Self> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STORE_FILE);
            Self::new(path)
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content =
            fs::read_to_string(&self.path).map_err(|e| StorageError::Read(e.to_string()))?;
        toml::from_str(&content).map_err(|e| StorageError::Read(e.to_string()))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_table()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut table = self.read_table().unwrap_or_else(|error| {
            tracing::warn!(path = %self.path.display(), %error, "discarding unreadable store file");
            BTreeMap::new()
        });
        table.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Write(e.to_string()))?;
        }
        let content = toml::to_string(&table).map_err(|e| StorageError::Write(e.to_string()))?;
        fs::write(&self.path, content).map_err(|e| StorageError::Write(e.to_string()))
    }
}
