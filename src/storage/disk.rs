//! Disk store implementation
//!
//! One file per key under a root directory, using tokio::fs for portable
//! async I/O. Keys are percent-encoded to build safe file names and
//! decoded back when listing, so arbitrary key strings (prefixed cache
//! keys contain ':' and spaces) survive the round trip.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Suffix used for in-flight writes, skipped when listing keys
const TEMP_SUFFIX: &str = ".tmp";

/// Filesystem-backed key-value store
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl AsRef<Path>) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(urlencoding::encode(key).into_owned())
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Write to a temp file, then atomically rename into place
        let path = self.path_for(key);
        let temp_path = {
            let mut name = path.as_os_str().to_owned();
            name.push(TEMP_SUFFIX);
            PathBuf::from(name)
        };
        tokio::fs::write(&temp_path, value).await?;
        tokio::fs::rename(&temp_path, &path).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        // Idempotent: a missing file is not an error
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove_many(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            self.remove(key).await?;
        }
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut dir = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = dir.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name.ends_with(TEMP_SUFFIX) {
                continue;
            }
            match urlencoding::decode(name) {
                Ok(key) => keys.push(key.into_owned()),
                Err(_) => {
                    tracing::warn!(file = %name, "Skipping undecodable store file");
                }
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_store() -> (TempDir, DiskStore) {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn test_open_creates_root_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        DiskStore::open(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let (_dir, store) = open_store().await;
        store.set("omdb:poster:dune", "{}").await.unwrap();
        assert_eq!(
            store.get("omdb:poster:dune").await.unwrap(),
            Some("{}".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let (_dir, store) = open_store().await;
        assert_eq!(store.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_with_special_characters_round_trip() {
        let (_dir, store) = open_store().await;
        let key = "omdb:poster:dune: part two";
        store.set(key, "v").await.unwrap();

        assert_eq!(store.get(key).await.unwrap(), Some("v".to_string()));
        assert_eq!(store.list_keys().await.unwrap(), vec![key.to_string()]);
    }

    #[tokio::test]
    async fn test_remove_is_idempotent() {
        let (_dir, store) = open_store().await;
        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_remove_many_deletes_all_named_keys() {
        let (_dir, store) = open_store().await;
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.set("c", "3").await.unwrap();

        store
            .remove_many(&["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        let keys = store.list_keys().await.unwrap();
        assert_eq!(keys, vec!["c".to_string()]);
    }

    #[tokio::test]
    async fn test_list_keys_skips_temp_files() {
        let (dir, store) = open_store().await;
        store.set("k", "v").await.unwrap();
        tokio::fs::write(dir.path().join("orphan.tmp"), "partial")
            .await
            .unwrap();

        assert_eq!(store.list_keys().await.unwrap(), vec!["k".to_string()]);
    }
}
