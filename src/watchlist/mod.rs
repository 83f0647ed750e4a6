//! Currently-watching list persistence
//!
//! The whole list lives under a single storage key as a JSON array of
//! `MediaRecord`. Reads degrade to an empty list on any storage or parse
//! failure; mutators rewrite the whole list and return the resulting
//! state, which is what the screens render.

use std::sync::Arc;

use crate::constants::WATCHLIST_KEY;
use crate::media::MediaRecord;
use crate::storage::{KeyValueStore, StorageError};

/// Currently-watching list over a shared store
#[derive(Clone)]
pub struct Watchlist {
    store: Arc<dyn KeyValueStore>,
}

impl Watchlist {
    /// Create a watchlist accessor over the given store
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Read the list; storage failure or corrupt JSON yields an empty list
    pub async fn get(&self) -> Vec<MediaRecord> {
        let raw = match self.store.get(WATCHLIST_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read watchlist");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<MediaRecord>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt watchlist payload, treating as empty");
                Vec::new()
            }
        }
    }

    /// Persist the whole list
    pub async fn set(&self, records: &[MediaRecord]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records)?;
        self.store.set(WATCHLIST_KEY, &raw).await
    }

    /// Prepend a record unless its id is already present
    ///
    /// Returns the resulting list either way.
    pub async fn add(&self, record: MediaRecord) -> Result<Vec<MediaRecord>, StorageError> {
        let current = self.get().await;
        if current.iter().any(|entry| entry.id == record.id) {
            return Ok(current);
        }

        let mut next = Vec::with_capacity(current.len() + 1);
        next.push(record);
        next.extend(current);
        self.set(&next).await?;
        Ok(next)
    }

    /// Remove the record with the given id (no-op if absent)
    pub async fn remove(&self, id: &str) -> Result<Vec<MediaRecord>, StorageError> {
        let mut next = self.get().await;
        next.retain(|entry| entry.id != id);
        self.set(&next).await?;
        Ok(next)
    }

    /// Set the rating (clamped into [0, 10]) on the record with the given id
    pub async fn update_rating(
        &self,
        id: &str,
        rating: f64,
    ) -> Result<Vec<MediaRecord>, StorageError> {
        let mut next = self.get().await;
        for entry in next.iter_mut() {
            if entry.id == id {
                entry.set_rating(rating);
            }
        }
        self.set(&next).await?;
        Ok(next)
    }
}
