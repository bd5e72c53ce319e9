//! Configuration Module
//!
//! Handles loading the Pokedex configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::api::PokeApiClient;

/// Runtime configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cache interval in seconds: sweep period and maximum entry age
    pub cache_interval: u64,
    /// PokeAPI base URL
    pub api_base_url: String,
    /// HTTP request timeout in seconds
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `POKEDEX_CACHE_INTERVAL_SECS` - Cache interval in seconds (default: 60)
    /// - `POKEAPI_BASE_URL` - PokeAPI base URL (default: https://pokeapi.co/api/v2)
    /// - `POKEAPI_TIMEOUT_SECS` - HTTP timeout in seconds (default: 10)
    ///
    /// Missing, unparseable or zero values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_interval: env::var("POKEDEX_CACHE_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_interval),
            api_base_url: env::var("POKEAPI_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.api_base_url),
            request_timeout: env::var("POKEAPI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn cache_interval(&self) -> Duration {
        Duration::from_secs(self.cache_interval)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_interval: 60,
            api_base_url: PokeApiClient::DEFAULT_BASE_URL.to_string(),
            request_timeout: 10,
        }
    }
}
