//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    api::{api_predict, api_schema},
    survey::{bank_page, bank_submit, health_page, health_submit},
    system::healthz,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",       get(health_page))
        .route("/health", get(health_page).post(health_submit))
        .route("/bank",   get(bank_page).post(bank_submit))

        // API endpoints
        .route("/api/schema/{domain}",  get(api_schema))
        .route("/api/predict/{domain}", post(api_predict))
        .route("/healthz",              get(healthz))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
