//! Key-value storage abstraction
//!
//! This module defines the `KeyValueStore` trait that all storage backends
//! must satisfy, plus the two bundled implementations:
//! - `MemoryStore`: HashMap-backed store for tests and ephemeral use
//! - `DiskStore`: one-file-per-key store backed by tokio::fs
//!
//! The store is shared across every persisting component (poster cache,
//! settings, watchlist); each component owns a disjoint key namespace and
//! is responsible for catching storage failures and degrading.

use async_trait::async_trait;
use thiserror::Error;

mod disk;
mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Async key-value store over string keys and string values
///
/// No transactional guarantees: every operation is independent, and a
/// crash between two `set` calls can leave either one applied.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value for a key, or None if the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Set a key to a value, overwriting any existing value
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key (no-op if the key is absent)
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Remove a batch of keys (absent keys are skipped)
    async fn remove_many(&self, keys: &[String]) -> Result<(), StorageError>;

    /// List every key currently present in the store
    async fn list_keys(&self) -> Result<Vec<String>, StorageError>;
}
