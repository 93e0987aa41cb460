//! Breach check handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::logic::breach::BreachReport;
use crate::{AppError, AppResult, AppState};

/// Batch requests larger than this are rejected before any lookup runs.
const MAX_BATCH_SIZE: usize = 50;

#[derive(Debug, Deserialize, Validate)]
pub struct CheckBreachRequest {
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchCheckRequest {
    #[validate(length(min = 1, message = "Password list cannot be empty"))]
    pub passwords: Vec<String>,
}

/// Check if a password has been exposed in known breaches
pub async fn check_breach(
    State(state): State<AppState>,
    Json(req): Json<CheckBreachRequest>,
) -> AppResult<Json<BreachReport>> {
    req.validate()?;

    let outcome = state.breach.check(&req.password).await;
    tracing::info!(is_breached = outcome.is_breached(), "Checked password for breaches");

    Ok(Json(BreachReport::from(&outcome)))
}

/// Check multiple passwords for breaches, sequentially
pub async fn batch_check_breach(
    State(state): State<AppState>,
    Json(req): Json<BatchCheckRequest>,
) -> AppResult<Json<Vec<BreachReport>>> {
    req.validate()?;
    if req.passwords.len() > MAX_BATCH_SIZE {
        return Err(AppError::ValidationError(format!(
            "Too many passwords (max {})",
            MAX_BATCH_SIZE
        )));
    }

    let outcomes = state.breach.batch_check(&req.passwords).await;
    tracing::info!(count = req.passwords.len(), "Batch checked passwords for breaches");

    Ok(Json(outcomes.iter().map(BreachReport::from).collect()))
}
