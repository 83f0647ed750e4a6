//! Poster cache entry type
//!
//! One entry per looked-up title. An entry existing at all means a remote
//! lookup was attempted and completed at `timestamp`; `poster: None`
//! records "checked, nothing there" and is distinct from no entry.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::constants::POSTER_CACHE_TTL_MS;

/// Persisted poster cache entry
///
/// Stored as JSON: `{"poster": string|null, "timestamp": epoch-ms}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PosterCacheEntry {
    /// Poster URL, or None when a completed lookup found no poster
    pub poster: Option<String>,
    /// Write time in epoch milliseconds
    pub timestamp: i64,
}

impl PosterCacheEntry {
    /// Create an entry timestamped now
    pub fn new(poster: Option<String>) -> Self {
        Self {
            poster,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    /// Create an entry with an explicit timestamp
    pub fn with_timestamp(poster: Option<String>, timestamp: i64) -> Self {
        Self { poster, timestamp }
    }

    /// Whether the entry is within the TTL window relative to `now_ms`
    pub fn is_fresh_at(&self, now_ms: i64) -> bool {
        now_ms - self.timestamp < POSTER_CACHE_TTL_MS
    }

    /// Whether the entry is within the TTL window right now
    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now().timestamp_millis())
    }
}
