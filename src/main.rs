//! Act pricing service entry point.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use actbook_pricing::cache::AppCache;
use actbook_pricing::config::Config;
use actbook_pricing::travel::HttpDistanceClient;
use actbook_pricing::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    let cache = AppCache::new(config.travel_cache_capacity, config.travel_cache_ttl);
    let distance = HttpDistanceClient::new(
        &config.travel_api_base_url,
        config.travel_api_timeout,
        cache.clone(),
    )
    .context("Failed to build travel client")?;
    if config.uses_default_travel_api() {
        info!("TRAVEL_API_BASE_URL not set, using local default");
    }
    info!("Travel API: {}", config.travel_api_base_url);

    let state = AppState::new(Arc::new(distance), config.policy.clone(), cache);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Pricing service listening on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Pricing service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received Ctrl+C, shutting down");
}
