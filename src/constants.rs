// Constants module - centralized default values and reserved key namespaces
//
// Storage key prefixes are load-bearing: the poster cache only ever
// touches keys under POSTER_CACHE_PREFIX, which is what lets clear()
// run against a store shared with settings and the watchlist.

// =============================================================================
// Poster cache
// =============================================================================

/// Reserved storage key prefix for poster cache entries
pub const POSTER_CACHE_PREFIX: &str = "omdb:poster:";

/// Poster cache entry time-to-live in milliseconds (7 days)
pub const POSTER_CACHE_TTL_MS: i64 = 1000 * 60 * 60 * 24 * 7;

// =============================================================================
// Settings
// =============================================================================

/// Reserved storage key prefix for user settings
pub const SETTINGS_PREFIX: &str = "settings:";

// =============================================================================
// Watchlist
// =============================================================================

/// Storage key holding the currently-watching list
pub const WATCHLIST_KEY: &str = "currentlyWatching";

// =============================================================================
// OMDb lookup defaults
// =============================================================================

/// Default OMDb API endpoint
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";

/// Default OMDb request timeout in milliseconds
pub const DEFAULT_OMDB_TIMEOUT_MS: u64 = 10_000;

/// Environment variable the OMDb API key is read from
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";
