//! Poster resolution cache
//!
//! Resolves a title to a poster URL with one consistent policy across the
//! app: prefer a fresh cached value, fall back to a remote lookup, honor
//! the reduced-data setting, and degrade to stale/absent data on any
//! failure. Public operations never fail outward, so rendering code can
//! call them without error handling.
//!
//! `resolve` is not a pure read: a cache miss writes an entry (positive
//! or negative) as a side effect. Tests assert on store state after the
//! call, not just the returned value.

use std::sync::Arc;

use futures::future::join_all;

use crate::constants::POSTER_CACHE_PREFIX;
use crate::lookup::TitleLookup;
use crate::media::MediaRecord;
use crate::settings::{BooleanSetting, Settings};
use crate::storage::KeyValueStore;

mod entry;

pub use entry::PosterCacheEntry;

/// Normalize a title for cache keying: trim + lowercase
///
/// "Breaking Bad" and "  breaking bad " share one entry.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Build the storage key for a title
pub fn cache_key(title: &str) -> String {
    format!("{}{}", POSTER_CACHE_PREFIX, normalize_title(title))
}

/// Title-to-poster cache over a shared key-value store
///
/// Constructed with its store, settings and lookup dependencies injected;
/// owns the `omdb:poster:` key namespace exclusively and never touches
/// keys outside it.
pub struct PosterCache {
    store: Arc<dyn KeyValueStore>,
    settings: Settings,
    lookup: Arc<dyn TitleLookup>,
}

impl PosterCache {
    /// Create a cache over the given dependencies
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        settings: Settings,
        lookup: Arc<dyn TitleLookup>,
    ) -> Self {
        Self {
            store,
            settings,
            lookup,
        }
    }

    /// Resolve a poster URL for a title
    ///
    /// Returns None for blank titles, confirmed-absent posters, and every
    /// degraded path (reduced-data mode, unconfigured lookup, storage or
    /// network failure with no cached value). Never fails outward.
    pub async fn resolve(&self, title: &str) -> Option<String> {
        if title.trim().is_empty() {
            return None;
        }

        let key = cache_key(title);
        let cached = self.read_entry(&key).await;

        if let Some(entry) = &cached {
            if entry.is_fresh() {
                tracing::debug!(key = %key, "Poster cache hit");
                return entry.poster.clone();
            }
        }

        // Stale or missing: decide whether a remote lookup is allowed
        let reduced_data = self
            .settings
            .get(BooleanSetting::ReducedDataMode, false)
            .await;
        if reduced_data {
            tracing::debug!(key = %key, "Reduced data mode on, skipping poster lookup");
            return cached.and_then(|entry| entry.poster);
        }

        // Configuration absence is not a lookup result: fall back to the
        // stale value without writing the cache
        if !self.lookup.is_configured() {
            return cached.and_then(|entry| entry.poster);
        }

        // Lookup uses the exact title string, not the normalized key
        match self.lookup.lookup_poster(title).await {
            Ok(result) if result.found && result.poster_url.is_some() => {
                let url = result.poster_url.unwrap_or_default();
                self.write_entry(&key, Some(url.clone())).await;
                Some(url)
            }
            Ok(_) => {
                // Completed lookup, no poster: negative-cache it
                self.write_entry(&key, None).await;
                None
            }
            Err(e) => {
                // A failed lookup still counts as "checked now" so a down
                // upstream is not hammered on every render for 7 days
                tracing::warn!(title = %title, error = %e, "Poster lookup failed");
                self.write_entry(&key, None).await;
                None
            }
        }
    }

    /// Attach posters to a batch of records
    ///
    /// Records already carrying usable art pass through untouched; the
    /// rest get `resolve(title)` attached (possibly None). All records
    /// are resolved concurrently and the output preserves input order
    /// and length exactly.
    pub async fn hydrate_batch(&self, records: Vec<MediaRecord>) -> Vec<MediaRecord> {
        let tasks = records.into_iter().map(|record| self.hydrate_one(record));
        join_all(tasks).await
    }

    async fn hydrate_one(&self, mut record: MediaRecord) -> MediaRecord {
        if record.has_usable_poster() {
            return record;
        }
        record.poster = self.resolve(&record.title).await;
        record
    }

    /// Remove every poster cache entry, fresh or stale
    ///
    /// Returns the number of entries removed; 0 when the cache is empty
    /// or the store cannot be read. Keys outside the poster namespace are
    /// never touched.
    pub async fn clear(&self) -> usize {
        let keys = match self.store.list_keys().await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list keys for poster cache clear");
                return 0;
            }
        };

        let poster_keys: Vec<String> = keys
            .into_iter()
            .filter(|key| key.starts_with(POSTER_CACHE_PREFIX))
            .collect();
        if poster_keys.is_empty() {
            return 0;
        }

        match self.store.remove_many(&poster_keys).await {
            Ok(()) => poster_keys.len(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to remove poster cache entries");
                0
            }
        }
    }

    /// Read and decode the entry under `key`, treating every failure as
    /// a miss; a corrupt entry is removed so it cannot fail repeatedly
    async fn read_entry(&self, key: &str) -> Option<PosterCacheEntry> {
        let raw = match self.store.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Poster cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_str::<PosterCacheEntry>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Corrupt poster cache entry, removing");
                if let Err(e) = self.store.remove(key).await {
                    tracing::warn!(key = %key, error = %e, "Failed to remove corrupt entry");
                }
                None
            }
        }
    }

    /// Persist an entry timestamped now; write failures are logged and
    /// swallowed so the resolved value still reaches the caller
    async fn write_entry(&self, key: &str, poster: Option<String>) {
        let entry = PosterCacheEntry::new(poster);
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode poster cache entry");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &raw).await {
            tracing::warn!(key = %key, error = %e, "Poster cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{LookupError, PosterLookup};
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    // Lookup stub that always reports the same outcome
    struct FixedLookup {
        configured: bool,
        result: Result<PosterLookup, ()>,
    }

    #[async_trait]
    impl TitleLookup for FixedLookup {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn lookup_poster(&self, _title: &str) -> Result<PosterLookup, LookupError> {
            match &self.result {
                Ok(result) => Ok(result.clone()),
                Err(()) => Err(LookupError::ConnectionFailed("down".to_string())),
            }
        }
    }

    fn cache_with(store: Arc<MemoryStore>, lookup: FixedLookup) -> PosterCache {
        PosterCache::new(store.clone(), Settings::new(store), Arc::new(lookup))
    }

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize_title("  Breaking Bad "), "breaking bad");
        assert_eq!(normalize_title("DUNE"), "dune");
    }

    #[test]
    fn test_cache_key_uses_reserved_prefix() {
        assert_eq!(cache_key(" Dune "), "omdb:poster:dune");
    }

    #[tokio::test]
    async fn test_blank_title_resolves_to_none_without_touching_store() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(
            store.clone(),
            FixedLookup {
                configured: true,
                result: Ok(PosterLookup::found("https://x/p.jpg")),
            },
        );

        assert_eq!(cache.resolve("").await, None);
        assert_eq!(cache.resolve("   ").await, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_successful_lookup_writes_entry_and_returns_url() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(
            store.clone(),
            FixedLookup {
                configured: true,
                result: Ok(PosterLookup::found("https://x/p.jpg")),
            },
        );

        assert_eq!(
            cache.resolve("Dune").await,
            Some("https://x/p.jpg".to_string())
        );

        let raw = store.get("omdb:poster:dune").await.unwrap().unwrap();
        let entry: PosterCacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.poster.as_deref(), Some("https://x/p.jpg"));
        assert!(entry.is_fresh());
    }

    #[tokio::test]
    async fn test_failed_lookup_negative_caches() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(
            store.clone(),
            FixedLookup {
                configured: true,
                result: Err(()),
            },
        );

        assert_eq!(cache.resolve("Dune").await, None);

        let raw = store.get("omdb:poster:dune").await.unwrap().unwrap();
        let entry: PosterCacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(entry.poster, None);
    }

    #[tokio::test]
    async fn test_unconfigured_lookup_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(
            store.clone(),
            FixedLookup {
                configured: false,
                result: Ok(PosterLookup::found("https://x/p.jpg")),
            },
        );

        assert_eq!(cache.resolve("Dune").await, None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_removed_and_treated_as_miss() {
        let store = Arc::new(MemoryStore::new());
        store.set("omdb:poster:dune", "{not json").await.unwrap();

        let cache = cache_with(
            store.clone(),
            FixedLookup {
                configured: true,
                result: Ok(PosterLookup::found("https://x/p.jpg")),
            },
        );

        assert_eq!(
            cache.resolve("Dune").await,
            Some("https://x/p.jpg".to_string())
        );

        // The corrupt payload was replaced by a valid entry
        let raw = store.get("omdb:poster:dune").await.unwrap().unwrap();
        assert!(serde_json::from_str::<PosterCacheEntry>(&raw).is_ok());
    }

    #[tokio::test]
    async fn test_clear_on_empty_store_returns_zero() {
        let store = Arc::new(MemoryStore::new());
        let cache = cache_with(
            store,
            FixedLookup {
                configured: false,
                result: Ok(PosterLookup::not_found()),
            },
        );
        assert_eq!(cache.clear().await, 0);
    }
}
