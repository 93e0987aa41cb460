//! Classifier-based scoring.
//!
//! Fans a scaled feature vector out to every loaded classifier and turns
//! each probability vector into a 0-50 score plus a threshold bucket. The
//! 0-50 range is deliberate: models weigh lower than the heuristic path
//! when the aggregate averages the samples.

pub mod inference;
pub mod scaler;
pub mod threshold;

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::features::PasswordFeatures;
use super::{round2, round3};
use inference::{ClassifierHandle, ProbabilityClassifier};
use scaler::FeatureScaler;
use threshold::{ScoreThresholds, StrengthBucket};

pub const ML_METHOD: &str = "ml_models";

/// One model's verdict, or its isolated failure.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ModelPrediction {
    Scored {
        /// strong-class probability * 50, range 0-50
        score: f64,
        strength: StrengthBucket,
        /// strong-class probability, rounded to 3 decimals
        confidence: f64,
        model_name: String,
    },
    Failed {
        error: String,
        model_name: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MlAnalysis {
    pub method: &'static str,
    pub predictions: BTreeMap<String, ModelPrediction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Owns the loaded classifiers and the optional scaler for the process
/// lifetime. Zero models is a valid, degraded state.
pub struct ModelScorer {
    models: Vec<Box<dyn ProbabilityClassifier>>,
    scaler: Option<FeatureScaler>,
}

impl ModelScorer {
    pub fn new(models: Vec<Box<dyn ProbabilityClassifier>>, scaler: Option<FeatureScaler>) -> Self {
        Self { models, scaler }
    }

    /// Scan a directory for classifier artifacts (*.onnx) and the optional
    /// scaler.json. Failures are logged per artifact and never fatal.
    pub fn load_from_dir(dir: &Path) -> Self {
        let scaler = FeatureScaler::load(&dir.join("scaler.json"));
        let mut models: Vec<Box<dyn ProbabilityClassifier>> = Vec::new();

        match std::fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("onnx") {
                        continue;
                    }
                    match ClassifierHandle::load(&path) {
                        Ok(model) => {
                            tracing::info!("Loaded model from {}", path.display());
                            models.push(Box::new(model));
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to load model from {}: {}",
                                path.display(),
                                e
                            );
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Model directory {} unavailable: {}", dir.display(), e);
            }
        }

        models.sort_by(|a, b| a.name().cmp(b.name()));

        if models.is_empty() {
            tracing::warn!("No models loaded - running with heuristic analysis only");
        } else {
            tracing::info!("Successfully loaded {} models", models.len());
        }

        Self { models, scaler }
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Score the features with every loaded classifier. One model's
    /// failure yields an error entry for that model only.
    pub fn ml_analysis(
        &self,
        features: &PasswordFeatures,
        thresholds: &ScoreThresholds,
    ) -> MlAnalysis {
        if self.models.is_empty() {
            return MlAnalysis {
                method: ML_METHOD,
                predictions: BTreeMap::new(),
                error: Some("No models loaded".to_string()),
            };
        }

        let vector = features.to_vector();
        let scaled = match &self.scaler {
            Some(scaler) => scaler.transform(&vector),
            None => vector,
        };

        let mut predictions = BTreeMap::new();
        for model in &self.models {
            let prediction = match model.predict_proba(&scaled) {
                Ok(proba) => {
                    let strong = f64::from(strong_class_probability(&proba));
                    let score = strong * 50.0;
                    ModelPrediction::Scored {
                        score: round2(score),
                        strength: thresholds.bucket(score),
                        confidence: round3(strong),
                        model_name: model.name().to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!("Error with model {}: {}", model.name(), e);
                    ModelPrediction::Failed {
                        error: e.to_string(),
                        model_name: model.name().to_string(),
                    }
                }
            };
            predictions.insert(model.name().to_string(), prediction);
        }

        MlAnalysis {
            method: ML_METHOD,
            predictions,
            error: None,
        }
    }
}

/// Strong-class probability with defensive degradation for classifiers
/// trained with fewer output classes than expected.
fn strong_class_probability(proba: &[f32]) -> f32 {
    if proba.len() > 2 {
        proba[2]
    } else if proba.len() > 1 {
        proba[1]
    } else {
        proba.first().copied().unwrap_or(0.0)
    }
}
