// SPDX-License-Identifier: MPL-2.0
//! Durable key-value storage.
//!
//! The locale layer persists a single string through the [`KeyValueStore`]
//! trait. Two backends are provided:
//!
//! - [`MemoryStore`]: a map kept in memory, optionally "unavailable" so every
//!   call fails the way a disabled browser store does
//! - [`FileStore`]: a TOML table of strings under the application data
//!   directory, surviving restarts
//!
//! Callers that must never fail (the locale manager) go through
//! [`read_or_absent`] and [`write_best_effort`], which log and swallow errors.

mod file;

pub use file::{FileStore, STORE_FILE};

use crate::error::StorageError;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// A string-to-string store that outlives the session.
pub trait KeyValueStore {
    /// Reads `key`. `Ok(None)` means the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads `key`, treating any failure as "absent".
pub fn read_or_absent(store: &dyn KeyValueStore, key: &str) -> Option<String> {
    match store.get_item(key) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "storage read failed; treating value as absent");
            None
        }
    }
}

/// Writes `key`, logging and discarding any failure.
///
/// Returns whether the write went through.
pub fn write_best_effort(store: &dyn KeyValueStore, key: &str, value: &str) -> bool {
    match store.set_item(key, value) {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(key, %error, "storage write failed; value kept in memory only");
            false
        }
    }
}

/// In-memory store, mainly for tests and for sessions without a data directory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<BTreeMap<String, String>>,
    unavailable: bool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            items: RefCell::default(),
            unavailable: true,
        }
    }

    /// A store pre-filled with `items`.
    #[must_use]
    pub fn with_items<K, V>(items: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            items: RefCell::new(
                items
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
            unavailable: false,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable);
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
