use std::sync::Arc;

use crate::{
    browse::search::DEFAULT_MIN_QUERY_LEN,
    config::Config,
    middleware::session::{CookieSessionGate, SessionGate},
    services::providers::CatalogProvider,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CatalogProvider>,
    pub session_gate: Arc<dyn SessionGate>,
    /// Search queries shorter than this answer `[]` without an upstream call
    pub min_query_len: usize,
    pub session_cookie: String,
    pub auth_redirect: String,
}

impl AppState {
    /// State with default search and session settings
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            session_gate: Arc::new(CookieSessionGate),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            session_cookie: "session".to_string(),
            auth_redirect: "/auth".to_string(),
        }
    }

    pub fn from_config(config: &Config, provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            min_query_len: config.search_min_query_len,
            session_cookie: config.session_cookie.clone(),
            auth_redirect: config.auth_redirect.clone(),
            ..Self::new(provider)
        }
    }

    pub fn with_session_gate(mut self, gate: Arc<dyn SessionGate>) -> Self {
        self.session_gate = gate;
        self
    }
}
