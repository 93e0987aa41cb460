//! Password analysis handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::analyzer::AnalysisReport;
use crate::logic::breach::BreachReport;
use crate::{AppResult, AppState};

#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeAndCheckResponse {
    pub analysis: AnalysisReport,
    pub breach_check: BreachReport,
}

/// Analyze the strength of a provided password
pub async fn analyze_password(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalysisReport>> {
    req.validate()?;

    let report = state.analyzer.analyze(&req.password)?;
    tracing::info!(hash_prefix = %report.password_hash_prefix, "Analyzed password");

    Ok(Json(report))
}

/// Analyze password strength and check for breaches in one request
pub async fn analyze_and_check(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> AppResult<Json<AnalyzeAndCheckResponse>> {
    req.validate()?;

    let analysis = state.analyzer.analyze(&req.password)?;
    let outcome = state.breach.check(&req.password).await;

    tracing::info!(
        hash_prefix = %analysis.password_hash_prefix,
        is_breached = outcome.is_breached(),
        "Analyzed and breach-checked password"
    );

    Ok(Json(AnalyzeAndCheckResponse {
        analysis,
        breach_check: BreachReport::from(&outcome),
    }))
}
