//! Password analysis composition root.
//!
//! Owns the heuristic scorer, the classifier set and the threshold table
//! for the process lifetime; everything is injected at construction so
//! tests can substitute degraded or stub configurations.

use serde::Serialize;
use sha2::{Digest, Sha256};

use super::aggregate::{aggregate, OverallVerdict};
use super::features;
use super::heuristic::{HeuristicAnalysis, HeuristicScorer};
use super::model::threshold::ScoreThresholds;
use super::model::{MlAnalysis, ModelScorer};
use super::AnalysisError;

/// Number of hex chars of the SHA-256 digest allowed into logs. Raw
/// passwords and full hashes never appear anywhere.
const LOG_HASH_PREFIX_LEN: usize = 8;

#[derive(Debug, Clone, Serialize)]
pub struct Analyses {
    pub zxcvbn: HeuristicAnalysis,
    pub ml_models: MlAnalysis,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub password_hash_prefix: String,
    pub length: usize,
    pub analyses: Analyses,
    pub feedback: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall: Option<OverallVerdict>,
}

pub struct PasswordAnalyzer {
    heuristic: HeuristicScorer,
    scorer: ModelScorer,
    thresholds: ScoreThresholds,
}

impl PasswordAnalyzer {
    pub fn new(scorer: ModelScorer, thresholds: ScoreThresholds) -> Self {
        Self {
            heuristic: HeuristicScorer,
            scorer,
            thresholds,
        }
    }

    pub fn models_loaded(&self) -> usize {
        self.scorer.model_count()
    }

    /// Run the full scoring pipeline: sanitize, extract, heuristic + model
    /// scoring, aggregate. Fails only on an empty (post-sanitization)
    /// password; every downstream failure degrades into the report.
    pub fn analyze(&self, password: &str) -> Result<AnalysisReport, AnalysisError> {
        let sanitized = features::sanitize(password);
        if sanitized.is_empty() {
            return Err(AnalysisError::EmptyPassword);
        }

        let hash_prefix = log_safe_prefix(&sanitized);
        tracing::debug!(hash_prefix = %hash_prefix, "starting password analysis");

        let extracted = features::extract(&sanitized)?;
        let zxcvbn = self.heuristic.analyze(&sanitized);
        let ml_models = self.scorer.ml_analysis(&extracted, &self.thresholds);
        let (feedback, overall) = aggregate(&zxcvbn, &ml_models, &self.thresholds);

        Ok(AnalysisReport {
            password_hash_prefix: hash_prefix,
            length: extracted.length,
            analyses: Analyses { zxcvbn, ml_models },
            feedback,
            overall,
        })
    }
}

/// Short SHA-256 prefix used to correlate log lines without exposing the
/// password.
pub fn log_safe_prefix(password: &str) -> String {
    let mut digest = hex::encode(Sha256::digest(password.as_bytes()));
    digest.truncate(LOG_HASH_PREFIX_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::threshold::StrengthBucket;

    fn degraded_analyzer() -> PasswordAnalyzer {
        PasswordAnalyzer::new(ModelScorer::new(Vec::new(), None), ScoreThresholds::default())
    }

    #[test]
    fn test_log_safe_prefix_known_value() {
        // sha256("password") = 5e884898da28...
        assert_eq!(log_safe_prefix("password"), "5e884898");
        assert_eq!(log_safe_prefix("password").len(), 8);
    }

    #[test]
    fn test_empty_password_rejected() {
        assert_eq!(
            degraded_analyzer().analyze("").unwrap_err(),
            AnalysisError::EmptyPassword
        );
        assert!(degraded_analyzer().analyze("\x01\x02").is_err());
    }

    #[test]
    fn test_weak_numeric_password_report() {
        let report = degraded_analyzer().analyze("123456").unwrap();

        assert_eq!(report.length, 6);
        assert_eq!(report.password_hash_prefix.len(), 8);
        // zero models: explicit degraded marker, not a failure
        assert_eq!(
            report.analyses.ml_models.error.as_deref(),
            Some("No models loaded")
        );
        // overall still computes from the heuristic alone
        let overall = report.overall.expect("overall should be present");
        assert_eq!(overall.strength, StrengthBucket::VeryWeak);
        assert_eq!(overall.score, 0.0);
    }

    #[test]
    fn test_strong_password_report() {
        let report = degraded_analyzer().analyze("cX9#mKv2$LpQ7wEr").unwrap();
        let overall = report.overall.expect("overall should be present");
        assert!(overall.score >= 75.0);
        assert!(overall.strength >= StrengthBucket::Strong);
    }

    #[test]
    fn test_sanitization_applies_before_analysis() {
        let report = degraded_analyzer().analyze("abc\x07def").unwrap();
        assert_eq!(report.length, 6);
    }

    #[test]
    fn test_report_serializes_without_overall_field_when_absent() {
        let report = degraded_analyzer().analyze("password").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        // overall present here; the omitted case is covered in aggregate tests,
        // but the field must serialize under the exact wire name
        assert!(json.get("overall").is_some());
        assert!(json.get("password_hash_prefix").is_some());
        assert_eq!(json["analyses"]["zxcvbn"]["method"], "zxcvbn");
        assert_eq!(json["analyses"]["ml_models"]["method"], "ml_models");
    }
}
