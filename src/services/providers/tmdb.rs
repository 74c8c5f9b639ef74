/// Metadata API provider (themoviedb.org v3)
///
/// Endpoints used:
/// 1. Search: /search/multi → movies, shows and people mixed, tagged by `media_type`
/// 2. Recommendations: /{kind}/{id}/recommendations
/// 3. Keywords: /{kind}/{id}/keywords
/// 4. Details: /{kind}/{id}
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use std::{sync::Arc, time::Duration};

use crate::{
    error::{AppError, AppResult},
    models::{
        ApiKeywords, ApiPage, ApiRecord, ApiTitleDetails, Keyword, MediaKind, Title,
        TitleDetails, TitleId,
    },
    services::providers::{CatalogProvider, ProviderMetrics, ProviderMetricsSnapshot},
};

const PROVIDER_NAME: &str = "tmdb";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    metrics: Arc<ProviderMetrics>,
}

impl TmdbProvider {
    /// Creates a provider with its own HTTP client
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, api_key, api_url))
    }

    pub fn with_client(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            metrics: Arc::new(ProviderMetrics::default()),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Issues one GET and decodes the JSON body, recording the outcome
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        self.metrics.record_request();

        let result = self.fetch_json(path, params).await;
        match &result {
            Ok(_) => {}
            Err(AppError::NotFound(_)) => {
                self.metrics.record_not_found();
                tracing::debug!(path = %path, provider = PROVIDER_NAME, "Catalog entry not found");
            }
            Err(e) => {
                self.metrics.record_failure();
                tracing::warn!(
                    error = %e,
                    path = %path,
                    provider = PROVIDER_NAME,
                    "Catalog request failed"
                );
            }
        }
        result
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let response = self
            .http_client
            .get(self.endpoint(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(path.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Metadata API returned status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize metadata API response"
            );
            AppError::ExternalApi(format!("Failed to parse metadata API response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<ApiRecord>> {
        let page: ApiPage<ApiRecord> = self
            .get_json("search/multi", &[("query", query)])
            .await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            provider = PROVIDER_NAME,
            "Catalog search completed"
        );

        Ok(page.results)
    }

    async fn recommendations_for(&self, id: TitleId, kind: MediaKind) -> AppResult<Vec<Title>> {
        let path = format!("{}/{}/recommendations", kind.path_segment(), id);
        let page: ApiPage<ApiRecord> = self.get_json(&path, &[]).await?;

        let titles: Vec<Title> = page
            .results
            .into_iter()
            .filter_map(|record| {
                let record_kind = record.kind_or(kind);
                record.into_title(record_kind)
            })
            .collect();

        tracing::info!(
            title_id = %id,
            kind = %kind,
            results = titles.len(),
            provider = PROVIDER_NAME,
            "Recommendations fetched"
        );

        Ok(titles)
    }

    async fn keywords_for(&self, id: TitleId, kind: MediaKind) -> AppResult<Vec<Keyword>> {
        let path = format!("{}/{}/keywords", kind.path_segment(), id);
        let payload: ApiKeywords = self.get_json(&path, &[]).await?;
        Ok(payload.into_keywords())
    }

    async fn title_details(&self, id: TitleId, kind: MediaKind) -> AppResult<TitleDetails> {
        let path = format!("{}/{}", kind.path_segment(), id);
        let payload: ApiTitleDetails = self.get_json(&path, &[]).await?;
        Ok(payload.into_details(kind))
    }

    fn metrics(&self) -> ProviderMetricsSnapshot {
        self.metrics.snapshot()
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
