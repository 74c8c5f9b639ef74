/// Catalog data provider abstraction
///
/// The front end talks to the remote metadata API only through this trait:
/// search, recommendations, keywords and the primary title lookup. Each call
/// is a single round trip; retry policy belongs to the caller.
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    error::AppResult,
    models::{ApiRecord, Keyword, MediaKind, Title, TitleDetails, TitleId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for remote catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Free-text search over every record kind the API knows about.
    ///
    /// Records are returned unfiltered; callers drop the kinds they cannot
    /// browse (see `services::title_search`).
    async fn search(&self, query: &str) -> AppResult<Vec<ApiRecord>>;

    /// Titles recommended for the given title
    async fn recommendations_for(&self, id: TitleId, kind: MediaKind) -> AppResult<Vec<Title>>;

    async fn keywords_for(&self, id: TitleId, kind: MediaKind) -> AppResult<Vec<Keyword>>;

    /// Primary lookup for a detail page. A missing title is `AppError::NotFound`.
    async fn title_details(&self, id: TitleId, kind: MediaKind) -> AppResult<TitleDetails>;

    /// Counters for operators; providers without metrics report zeros
    fn metrics(&self) -> ProviderMetricsSnapshot {
        ProviderMetricsSnapshot::default()
    }

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Call counters recorded at the provider boundary
#[derive(Debug, Default)]
pub struct ProviderMetrics {
    requests: AtomicU64,
    failures: AtomicU64,
    not_found: AtomicU64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetricsSnapshot {
    pub requests: u64,
    pub failures: u64,
    pub not_found: u64,
}

impl ProviderMetrics {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_not_found(&self) {
        self.not_found.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> ProviderMetricsSnapshot {
        ProviderMetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
        }
    }
}
