//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::logic::breach::ProbeStatus;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_status: String,
    breach_api_status: &'static str,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let loaded = state.analyzer.models_loaded();
    let model_status = if loaded > 0 {
        format!("{} models loaded", loaded)
    } else {
        "No models loaded".to_string()
    };

    let breach_api_status = match state.breach.probe().await {
        ProbeStatus::Reachable => "API accessible",
        ProbeStatus::DegradedStatus => "API connectivity issue",
        ProbeStatus::Unreachable => "API connectivity unavailable",
    };

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_status,
        breach_api_status,
    })
}
