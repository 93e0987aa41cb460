//! Score thresholds and strength bucketing.
//!
//! The bucket is a pure function of the numeric score; nothing else may
//! set it. Boundary values map to the higher bucket.

use serde::{Deserialize, Serialize};

/// Threshold-derived strength label. Distinct from the zxcvbn-style
/// `HeuristicStrength` label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrengthBucket {
    #[serde(rename = "Very Weak")]
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    #[serde(rename = "Very Strong")]
    VeryStrong,
}

impl StrengthBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

/// Bucket boundaries on the 0-100 score scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub very_weak: f64,
    pub weak: f64,
    pub moderate: f64,
    pub strong: f64,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            very_weak: 20.0,
            weak: 40.0,
            moderate: 60.0,
            strong: 80.0,
        }
    }
}

impl ScoreThresholds {
    pub fn bucket(&self, score: f64) -> StrengthBucket {
        if score < self.very_weak {
            StrengthBucket::VeryWeak
        } else if score < self.weak {
            StrengthBucket::Weak
        } else if score < self.moderate {
            StrengthBucket::Moderate
        } else if score < self.strong {
            StrengthBucket::Strong
        } else {
            StrengthBucket::VeryStrong
        }
    }
}
