use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use catalog_browser::{
    api::{create_router, AppState},
    config::Config,
    services::TmdbProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("catalog_browser=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let provider = TmdbProvider::new(
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
        config.request_timeout(),
    )
    .context("Failed to build metadata API client")?;

    let state = AppState::from_config(&config, Arc::new(provider));
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(address = %addr, api_url = %config.tmdb_api_url, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
