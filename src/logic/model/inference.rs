//! Classifier inference - ONNX Runtime integration.
//!
//! Each trained classifier is an opaque `.onnx` artifact exposing a
//! probability vector over strength classes. Loading happens once at
//! startup; sessions live for the process lifetime.

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use crate::logic::features::FEATURE_COUNT;

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct InferenceError(pub String);

/// Capability exposed by every classifier: a named oracle mapping a
/// feature vector to a probability vector over strength classes. Lets the
/// scorer swap the ONNX-backed implementation for stubs in tests.
pub trait ProbabilityClassifier: Send + Sync {
    fn name(&self) -> &str;

    fn predict_proba(&self, features: &[f32; FEATURE_COUNT])
        -> Result<Vec<f32>, InferenceError>;
}

/// A loaded classifier. The session is mutex-guarded because ONNX Runtime
/// requires exclusive access to run.
pub struct ClassifierHandle {
    name: String,
    session: Mutex<Session>,
}

impl ClassifierHandle {
    /// Load a classifier artifact from disk.
    pub fn load(path: &Path) -> Result<Self, InferenceError> {
        if !path.exists() {
            return Err(InferenceError(format!(
                "Model not found: {}",
                path.display()
            )));
        }

        let session = Session::builder()
            .map_err(|e| InferenceError(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| InferenceError(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| InferenceError(format!("Failed to load model: {}", e)))?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());

        Ok(Self {
            name,
            session: Mutex::new(session),
        })
    }

    /// Run the session on a single feature vector and return the flat
    /// probability vector.
    fn run_session(&self, features: &[f32; FEATURE_COUNT]) -> Result<Vec<f32>, InferenceError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| InferenceError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();

        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| InferenceError("No output defined".to_string()))?;

        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| InferenceError(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(&output_name)
            .ok_or_else(|| InferenceError("No output".to_string()))?;

        let output_tensor = output
            .try_extract_tensor::<f32>()
            .map_err(|e| InferenceError(format!("Extract error: {}", e)))?;

        Ok(output_tensor.1.to_vec())
    }
}

impl ProbabilityClassifier for ClassifierHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict_proba(
        &self,
        features: &[f32; FEATURE_COUNT],
    ) -> Result<Vec<f32>, InferenceError> {
        self.run_session(features)
    }
}

impl std::fmt::Debug for ClassifierHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierHandle")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_artifact() {
        let result = ClassifierHandle::load(Path::new("/nonexistent/model.onnx"));
        assert!(result.is_err());
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Model not found"));
    }
}
