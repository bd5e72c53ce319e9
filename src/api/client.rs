//! PokeAPI HTTP client
//!
//! Every request is keyed in the shared [`TimedCache`] by its full URL. A hit
//! is decoded in place of the network call; a miss is fetched, decoded, and
//! then stored.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::cache::TimedCache;
use crate::error::Result;
use crate::models::{LocationArea, LocationAreaPage, Pokemon};

/// A decoded response and whether it was served from the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched<T> {
    pub value: T,
    pub from_cache: bool,
}

/// Client for the PokeAPI, sharing one cache across all commands.
#[derive(Debug, Clone)]
pub struct PokeApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: Arc<TimedCache>,
}

impl PokeApiClient {
    /// Public PokeAPI v2 endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://pokeapi.co/api/v2";

    /// Creates a client for `base_url` with the given request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration, cache: Arc<TimedCache>) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url: String = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            cache,
        })
    }

    /// URL of the first page of location areas.
    pub fn first_location_page_url(&self) -> String {
        format!("{}/location-area/", self.base_url)
    }

    /// The cache backing this client.
    pub fn cache(&self) -> &Arc<TimedCache> {
        &self.cache
    }

    /// Fetches one page of location areas by its absolute URL.
    ///
    /// Page URLs come from `next`/`previous` of an earlier page, so they are
    /// used as-is.
    pub async fn location_areas(&self, url: &str) -> Result<Fetched<LocationAreaPage>> {
        self.fetch_tracked(url).await
    }

    /// Fetches a single location area by name or id.
    pub async fn location_area(&self, name: &str) -> Result<LocationArea> {
        let url = format!("{}/location-area/{}", self.base_url, name);
        self.fetch(&url).await
    }

    /// Fetches a Pokemon by name or id.
    pub async fn pokemon(&self, name: &str) -> Result<Pokemon> {
        let url = format!("{}/pokemon/{}", self.base_url, name);
        self.fetch(&url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        Ok(self.fetch_tracked(url).await?.value)
    }

    async fn fetch_tracked<T: DeserializeOwned>(&self, url: &str) -> Result<Fetched<T>> {
        if let Some(bytes) = self.cache.get(url) {
            debug!("Cache hit for {}", url);
            return Ok(Fetched {
                value: serde_json::from_slice(&bytes)?,
                from_cache: true,
            });
        }

        debug!("Cache miss for {}, fetching", url);
        let response = self.http.get(url).send().await?.error_for_status()?;
        let bytes = response.bytes().await?;

        // Decode first so a malformed body is never cached
        let value = serde_json::from_slice(&bytes)?;
        self.cache.add(url, bytes.to_vec())?;

        Ok(Fetched {
            value,
            from_cache: false,
        })
    }
}
