use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::session::require_session;

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .nest("/api", api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Catalog routes under /api, all behind the session gate
fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search))
        .route("/recommend/:kind/:id", get(handlers::recommendations))
        .route("/keywords/:kind/:id", get(handlers::keywords))
        .route("/:kind/:id", get(handlers::title_details))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}
