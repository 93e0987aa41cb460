//! Feature scaler artifact.
//!
//! Optional linear rescaling produced at training time (standard-scaler
//! semantics: `(x - mean) / scale` per field, same order as the feature
//! layout). Absent artifact means identity.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::logic::features::FEATURE_COUNT;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub mean: Vec<f32>,
    pub scale: Vec<f32>,
}

impl FeatureScaler {
    /// Load the scaler from a JSON artifact. Missing file is a valid
    /// degraded configuration; a malformed file is logged and skipped.
    pub fn load(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| serde_json::from_str::<Self>(&raw).map_err(|e| e.to_string()));

        match parsed {
            Ok(scaler) => {
                tracing::info!("Loaded scaler from {}", path.display());
                Some(scaler)
            }
            Err(e) => {
                tracing::error!("Failed to load scaler from {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Rescale a feature vector. Fields without trained parameters fall
    /// back to identity (mean 0, scale 1); a zero scale is treated as 1 to
    /// keep the transform total.
    pub fn transform(&self, features: &[f32; FEATURE_COUNT]) -> [f32; FEATURE_COUNT] {
        let mut scaled = [0.0f32; FEATURE_COUNT];

        for i in 0..FEATURE_COUNT {
            let mean = self.mean.get(i).copied().unwrap_or(0.0);
            let scale = self.scale.get(i).copied().unwrap_or(1.0);
            let scale = if scale.abs() < 1e-12 { 1.0 } else { scale };

            scaled[i] = (features[i] - mean) / scale;
        }

        scaled
    }
}
