//! OMDb lookup client
//!
//! Queries the OMDb title endpoint (`?t=<title>&apikey=<key>`) and maps
//! the response onto `PosterLookup`. OMDb reports missing art with the
//! literal string "N/A" in the `Poster` field and failed matches with
//! `Response: "False"`; both read as "no poster found".

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::constants::{DEFAULT_OMDB_BASE_URL, DEFAULT_OMDB_TIMEOUT_MS, OMDB_API_KEY_ENV};
use crate::media::POSTER_NOT_AVAILABLE;

use super::{LookupError, PosterLookup, TitleLookup};

/// OMDb client configuration
#[derive(Debug, Clone)]
pub struct OmdbConfig {
    /// API key; an empty key means the lookup is unconfigured
    pub api_key: String,
    /// Base URL of the OMDb API
    pub base_url: String,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl OmdbConfig {
    /// Build a config with the given API key and default endpoint/timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OMDB_BASE_URL.to_string(),
            timeout_ms: DEFAULT_OMDB_TIMEOUT_MS,
        }
    }

    /// Read the API key from the environment
    ///
    /// A missing key is not an error: the resulting client reports
    /// `is_configured() == false` and the poster cache falls back to
    /// cached values.
    pub fn from_env() -> Self {
        let api_key = std::env::var(OMDB_API_KEY_ENV).unwrap_or_default();
        if api_key.is_empty() {
            tracing::warn!(
                env_var = OMDB_API_KEY_ENV,
                "OMDb API key is not configured; poster lookups disabled"
            );
        }
        Self::new(api_key)
    }
}

/// Raw OMDb title response
///
/// Only the fields the poster cache needs; everything else is ignored.
#[derive(Debug, Deserialize)]
struct OmdbTitleResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// OMDb-backed title lookup
pub struct OmdbClient {
    config: OmdbConfig,
    http: reqwest::Client,
}

impl OmdbClient {
    /// Create a client from configuration
    pub fn new(config: OmdbConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();
        Self { config, http }
    }

    /// Create a client configured from the environment
    pub fn from_env() -> Self {
        Self::new(OmdbConfig::from_env())
    }
}

#[async_trait]
impl TitleLookup for OmdbClient {
    fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    async fn lookup_poster(&self, title: &str) -> Result<PosterLookup, LookupError> {
        if !self.is_configured() {
            return Err(LookupError::NotConfigured);
        }

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[("t", title), ("apikey", &self.config.api_key)])
            .send()
            .await
            .map_err(|e| LookupError::ConnectionFailed(e.to_string()))?;

        let payload: OmdbTitleResponse = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidResponse(e.to_string()))?;

        if payload.response != "True" {
            return Ok(PosterLookup::not_found());
        }

        match payload.poster {
            Some(poster) if !poster.is_empty() && poster != POSTER_NOT_AVAILABLE => {
                Ok(PosterLookup::found(poster))
            }
            _ => Ok(PosterLookup::not_found()),
        }
    }
}
