//! Runtime configuration for the VibeNotes client.
//!
//! The API base URL is read from the environment (after loading an optional
//! `.env` file) and falls back to the local development backend.

use std::time::Duration;

/// Preferred environment variable for the backend base URL.
pub const API_URL_VAR: &str = "VIBENOTES_API_URL";

/// Variable shared with the web frontend's `.env`.
pub const LEGACY_API_URL_VAR: &str = "VUE_APP_API_URL";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Path prefix every REST endpoint lives under.
const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend origin without the `/api` prefix, e.g. `http://localhost:8080`.
    pub api_base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    /// Build a config for the given base URL with default timeouts.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(base_url),
            request_timeout: Duration::from_secs(120),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Replace the base URL, keeping the timeouts. Blank values are ignored.
    pub fn set_base_url(&mut self, base_url: &str) {
        if is_set(base_url) {
            self.api_base_url = normalize_base_url(base_url);
        }
    }

    /// Load `.env` (if present) and read the base URL from the environment.
    ///
    /// Precedence: `VIBENOTES_API_URL` > `VUE_APP_API_URL` > localhost default.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the config through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(API_URL_VAR)
            .filter(|url| is_set(url))
            .or_else(|| lookup(LEGACY_API_URL_VAR).filter(|url| is_set(url)))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        Self::with_base_url(&base_url)
    }

    /// Full URL of the REST API root (`<base>/api`).
    pub fn api_url(&self) -> String {
        format!("{}{}", self.api_base_url, API_PREFIX)
    }
}

fn is_set(value: &str) -> bool {
    !value.trim().is_empty()
}

fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }
}
