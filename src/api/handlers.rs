use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{Keyword, MediaKind, Title, TitleDetails, TitleId},
    services::{providers::ProviderMetricsSnapshot, title_search::search_titles},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Movies and shows matching `q`; short queries answer `[]` without
/// reaching the metadata API
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Title>>> {
    let query = params.q.trim();
    if query.chars().count() < state.min_query_len {
        return Ok(Json(Vec::new()));
    }

    let titles = search_titles(state.provider.as_ref(), query).await?;
    Ok(Json(titles))
}

pub async fn recommendations(
    State(state): State<AppState>,
    Path((kind, id)): Path<(MediaKind, u64)>,
) -> AppResult<Json<Vec<Title>>> {
    let titles = state
        .provider
        .recommendations_for(TitleId(id), kind)
        .await?;
    Ok(Json(titles))
}

pub async fn keywords(
    State(state): State<AppState>,
    Path((kind, id)): Path<(MediaKind, u64)>,
) -> AppResult<Json<Vec<Keyword>>> {
    let keywords = state.provider.keywords_for(TitleId(id), kind).await?;
    Ok(Json(keywords))
}

/// Primary title lookup; a title missing upstream answers 404
pub async fn title_details(
    State(state): State<AppState>,
    Path((kind, id)): Path<(MediaKind, u64)>,
) -> AppResult<Json<TitleDetails>> {
    let details = state.provider.title_details(TitleId(id), kind).await?;
    Ok(Json(details))
}

/// Provider counters
pub async fn metrics(State(state): State<AppState>) -> Json<ProviderMetricsSnapshot> {
    Json(state.provider.metrics())
}
