//! In-memory store implementation
//!
//! HashMap behind a parking_lot RwLock. Never fails, so it doubles as the
//! reference backend in unit and integration tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use super::{KeyValueStore, StorageError};

/// HashMap-backed key-value store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn remove_many(&self, keys: &[String]) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}
