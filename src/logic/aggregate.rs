//! Score aggregation.
//!
//! Merges the heuristic verdict and the per-model verdicts into one
//! overall score. Samples are averaged directly even though the heuristic
//! is on a 0-100 scale and models are on 0-50: loading more models
//! deliberately dilutes the heuristic's weight.

use std::collections::BTreeSet;

use serde::Serialize;

use super::heuristic::HeuristicAnalysis;
use super::model::{MlAnalysis, ModelPrediction};
use super::model::threshold::{ScoreThresholds, StrengthBucket};
use super::round2;

#[derive(Debug, Clone, Serialize)]
pub struct OverallVerdict {
    pub score: f64,
    pub strength: StrengthBucket,
}

/// Combine feedback and compute the overall verdict.
///
/// Feedback is the set-union of the heuristic's suggestions plus its
/// warning when non-empty; model scorers contribute no text. The overall
/// verdict is omitted when no score sample is available (failed estimator
/// and zero successful models) - distinct from a present zero score.
pub fn aggregate(
    heuristic: &HeuristicAnalysis,
    ml: &MlAnalysis,
    thresholds: &ScoreThresholds,
) -> (Vec<String>, Option<OverallVerdict>) {
    let mut feedback: BTreeSet<String> = heuristic.feedback.iter().cloned().collect();
    if !heuristic.warning.is_empty() {
        feedback.insert(heuristic.warning.clone());
    }

    let mut scores = Vec::new();
    if heuristic.error.is_none() {
        scores.push(heuristic.score);
    }
    for prediction in ml.predictions.values() {
        if let ModelPrediction::Scored { score, .. } = prediction {
            scores.push(*score);
        }
    }

    let overall = if scores.is_empty() {
        None
    } else {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        Some(OverallVerdict {
            score: round2(mean),
            strength: thresholds.bucket(mean),
        })
    };

    (feedback.into_iter().collect(), overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::heuristic::{HeuristicStrength, HEURISTIC_METHOD};
    use crate::logic::model::ML_METHOD;
    use std::collections::BTreeMap;

    fn heuristic_ok(score: f64, feedback: &[&str], warning: &str) -> HeuristicAnalysis {
        HeuristicAnalysis {
            method: HEURISTIC_METHOD,
            score,
            strength: HeuristicStrength::from_raw((score / 25.0) as u8),
            feedback: feedback.iter().map(|s| s.to_string()).collect(),
            warning: warning.to_string(),
            error: None,
        }
    }

    fn heuristic_failed() -> HeuristicAnalysis {
        HeuristicAnalysis {
            method: HEURISTIC_METHOD,
            score: 0.0,
            strength: HeuristicStrength::Unknown,
            feedback: vec!["Unable to analyze with zxcvbn".to_string()],
            warning: "Analysis failed".to_string(),
            error: Some("estimator failure".to_string()),
        }
    }

    fn ml_empty() -> MlAnalysis {
        MlAnalysis {
            method: ML_METHOD,
            predictions: BTreeMap::new(),
            error: Some("No models loaded".to_string()),
        }
    }

    fn ml_with(predictions: Vec<(&str, ModelPrediction)>) -> MlAnalysis {
        MlAnalysis {
            method: ML_METHOD,
            predictions: predictions
                .into_iter()
                .map(|(name, p)| (name.to_string(), p))
                .collect(),
            error: None,
        }
    }

    fn scored(name: &str, score: f64) -> ModelPrediction {
        ModelPrediction::Scored {
            score,
            strength: ScoreThresholds::default().bucket(score),
            confidence: score / 50.0,
            model_name: name.to_string(),
        }
    }

    #[test]
    fn test_heuristic_alone_drives_overall() {
        let (_, overall) = aggregate(
            &heuristic_ok(100.0, &[], ""),
            &ml_empty(),
            &ScoreThresholds::default(),
        );
        let overall = overall.unwrap();
        assert_eq!(overall.score, 100.0);
        assert_eq!(overall.strength, StrengthBucket::VeryStrong);
    }

    #[test]
    fn test_mixed_scales_average_directly() {
        let ml = ml_with(vec![("random_forest", scored("random_forest", 40.0))]);
        let (_, overall) = aggregate(
            &heuristic_ok(100.0, &[], ""),
            &ml,
            &ScoreThresholds::default(),
        );
        let overall = overall.unwrap();
        assert_eq!(overall.score, 70.0);
        assert_eq!(overall.strength, StrengthBucket::Strong);
    }

    #[test]
    fn test_failed_model_contributes_no_sample() {
        let ml = ml_with(vec![
            (
                "xgboost",
                ModelPrediction::Failed {
                    error: "inference failed".to_string(),
                    model_name: "xgboost".to_string(),
                },
            ),
            ("random_forest", scored("random_forest", 10.0)),
        ]);
        let (_, overall) = aggregate(
            &heuristic_ok(50.0, &[], ""),
            &ml,
            &ScoreThresholds::default(),
        );
        // mean of 50 and 10 only
        assert_eq!(overall.unwrap().score, 30.0);
    }

    #[test]
    fn test_no_samples_omits_overall() {
        let (feedback, overall) = aggregate(
            &heuristic_failed(),
            &ml_empty(),
            &ScoreThresholds::default(),
        );
        assert!(overall.is_none());
        // degraded-path feedback still surfaces
        assert!(!feedback.is_empty());
    }

    #[test]
    fn test_feedback_union_collapses_duplicates() {
        let (feedback, _) = aggregate(
            &heuristic_ok(25.0, &["Add another word", "Add another word"], "Top-10 password"),
            &ml_empty(),
            &ScoreThresholds::default(),
        );
        assert_eq!(feedback.len(), 2);
        assert!(feedback.contains(&"Add another word".to_string()));
        assert!(feedback.contains(&"Top-10 password".to_string()));
    }

    #[test]
    fn test_empty_warning_not_collected() {
        let (feedback, _) = aggregate(
            &heuristic_ok(25.0, &["Use a longer password"], ""),
            &ml_empty(),
            &ScoreThresholds::default(),
        );
        assert_eq!(feedback, vec!["Use a longer password".to_string()]);
    }

    #[test]
    fn test_boundary_mean_maps_to_higher_bucket() {
        let ml = ml_with(vec![("m", scored("m", 30.0))]);
        let (_, overall) = aggregate(
            &heuristic_ok(50.0, &[], ""),
            &ml,
            &ScoreThresholds::default(),
        );
        // mean exactly 40 -> Moderate, never Weak
        assert_eq!(overall.unwrap().strength, StrengthBucket::Moderate);
    }
}
