use serde::Deserialize;
use std::time::Duration;

use crate::browse::{paginator::DEFAULT_PAGE_SIZE, SearchSettings};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Metadata API key, sent as the `api_key` query parameter
    pub tmdb_api_key: String,

    /// Metadata API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Per-request timeout for upstream calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Quiescence window before a typed query is sent
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Queries shorter than this never reach the network
    #[serde(default = "default_search_min_query_len")]
    pub search_min_query_len: usize,

    #[serde(default = "default_page_size")]
    pub recommendation_page_size: usize,

    /// Cookie that carries the session token
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,

    /// Where requests without a session are sent
    #[serde(default = "default_auth_redirect")]
    pub auth_redirect: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_search_debounce_ms() -> u64 {
    500
}

fn default_search_min_query_len() -> usize {
    3
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_session_cookie() -> String {
    "session".to_string()
}

fn default_auth_redirect() -> String {
    "/auth".to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Search-as-you-type settings for the browse core
    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.search_debounce_ms),
            min_query_len: self.search_min_query_len,
        }
    }

    /// Recommendation page size, never zero
    pub fn page_size(&self) -> usize {
        self.recommendation_page_size.max(1)
    }
}
