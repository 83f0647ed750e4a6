//! Remote title lookup
//!
//! This module defines the `TitleLookup` trait the poster cache consumes
//! and the OMDb-backed implementation. The cache never calls the lookup
//! when `is_configured()` is false, and it treats every lookup error as
//! "no poster found", so implementations only need to report honestly.

use async_trait::async_trait;
use std::fmt;

mod omdb;

pub use omdb::{OmdbClient, OmdbConfig};

/// Error type for lookup operations
#[derive(Debug)]
pub enum LookupError {
    /// Failed to reach the metadata API (network error or timeout)
    ConnectionFailed(String),
    /// The API responded but the payload could not be parsed
    InvalidResponse(String),
    /// The lookup was called without credentials configured
    NotConfigured,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::ConnectionFailed(msg) => {
                write!(f, "Failed to reach metadata API: {}", msg)
            }
            LookupError::InvalidResponse(msg) => {
                write!(f, "Invalid metadata API response: {}", msg)
            }
            LookupError::NotConfigured => {
                write!(f, "Metadata API is not configured")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// Outcome of a poster lookup
///
/// `found` is only true when the API returned a usable poster URL; a
/// successful response carrying the "N/A" sentinel counts as not found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosterLookup {
    /// Whether a usable poster was found
    pub found: bool,
    /// The poster URL when found
    pub poster_url: Option<String>,
}

impl PosterLookup {
    /// A lookup that found the given poster URL
    pub fn found(url: impl Into<String>) -> Self {
        Self {
            found: true,
            poster_url: Some(url.into()),
        }
    }

    /// A lookup that completed but found no poster
    pub fn not_found() -> Self {
        Self {
            found: false,
            poster_url: None,
        }
    }
}

/// Title-to-poster lookup against a remote metadata API
#[async_trait]
pub trait TitleLookup: Send + Sync {
    /// Whether the lookup has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Look up poster art for a title
    async fn lookup_poster(&self, title: &str) -> Result<PosterLookup, LookupError>;
}
