//! Liveness endpoint.

use axum::{extract::State, Json};
use serde_json::{json, Value};
use surveycast_common::Domain;

use crate::state::SharedState;

/// GET /healthz
pub async fn healthz(State(state): State<SharedState>) -> Json<Value> {
    let sessions = state.sessions.len().await;
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": state.predictor(Domain::Health).endpoint().is_some(),
            "bank": state.predictor(Domain::Bank).endpoint().is_some(),
        },
        "health_profile": state.config.health.profile,
        "sessions": sessions,
    }))
}
