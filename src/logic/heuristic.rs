//! Heuristic strength scoring via the zxcvbn estimator.
//!
//! The estimator's raw 0-4 score is normalized to 0-100. Its label set
//! (Very Weak / Weak / Fair / Good / Strong) is NOT the threshold-bucket
//! enum used by the model path and the aggregate; the two must not be
//! conflated.

use serde::Serialize;

/// zxcvbn refuses inputs longer than this; passwords are truncated, not
/// rejected.
pub const ZXCVBN_MAX_LEN: usize = 72;

pub const HEURISTIC_METHOD: &str = "zxcvbn";

/// zxcvbn-style label, indexed by the raw 0-4 score. `Unknown` is the
/// degraded value reported when the estimator itself fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeuristicStrength {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Fair,
    Good,
    Strong,
    Unknown,
}

impl HeuristicStrength {
    pub fn from_raw(score: u8) -> Self {
        match score {
            0 => Self::VeryWeak,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeuristicAnalysis {
    pub method: &'static str,
    /// Raw score * 25, range 0-100
    pub score: f64,
    pub strength: HeuristicStrength,
    /// Suggestion strings from the estimator
    pub feedback: Vec<String>,
    /// Warning string, empty if the estimator raised none
    pub warning: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Stateless wrapper around the external estimator. Failures degrade to a
/// zero-score result; they never propagate.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn analyze(&self, password: &str) -> HeuristicAnalysis {
        let truncated: String = password.chars().take(ZXCVBN_MAX_LEN).collect();

        match zxcvbn::zxcvbn(&truncated, &[]) {
            Ok(estimate) => {
                let raw = estimate.score();
                let (feedback, warning) = match estimate.feedback() {
                    Some(fb) => (
                        fb.suggestions().iter().map(|s| s.to_string()).collect(),
                        fb.warning().map(|w| w.to_string()).unwrap_or_default(),
                    ),
                    None => (Vec::new(), String::new()),
                };

                HeuristicAnalysis {
                    method: HEURISTIC_METHOD,
                    score: f64::from(raw) * 25.0,
                    strength: HeuristicStrength::from_raw(raw),
                    feedback,
                    warning,
                    error: None,
                }
            }
            Err(e) => {
                tracing::error!("zxcvbn analysis failed: {}", e);
                HeuristicAnalysis {
                    method: HEURISTIC_METHOD,
                    score: 0.0,
                    strength: HeuristicStrength::Unknown,
                    feedback: vec!["Unable to analyze with zxcvbn".to_string()],
                    warning: "Analysis failed".to_string(),
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
