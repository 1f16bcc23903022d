//! Act booking pricing service.
//!
//! HTTP/JSON API that prices an act for a booking enquiry. The booking
//! frontend posts the stored act document along with the enquiry's county,
//! address and date, and receives the total with a decision trace.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub mod cache;
pub mod config;
pub mod error;
pub mod pricing;
pub mod travel;

use cache::{AppCache, CacheStats};
use pricing::PricingPolicy;
use travel::DistanceClient;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub distance: Arc<dyn DistanceClient>,
    pub policy: Arc<PricingPolicy>,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(distance: Arc<dyn DistanceClient>, policy: PricingPolicy, cache: AppCache) -> Self {
        Self {
            distance,
            policy: Arc::new(policy),
            cache,
        }
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache/invalidate", post(cache_invalidate))
        .nest("/api/pricing", pricing::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

async fn cache_invalidate(State(state): State<AppState>) -> Json<Value> {
    state.cache.invalidate_all();
    Json(json!({ "invalidated": true }))
}
