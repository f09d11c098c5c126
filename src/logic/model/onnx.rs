//! ONNX Runtime backend
//!
//! Input: `[rows, features]` f32 tensor. Output: first model output, one
//! value per row. Float outputs (regressors, probabilities) and int64 outputs
//! (classifier labels) are both accepted.

use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{Classifier, PredictionError};
use crate::logic::ingest::FeatureMatrix;

pub struct OnnxClassifier {
    // `Session::run` needs `&mut`, predictions are serialized per model
    session: Mutex<Session>,
    output_name: String,
}

impl OnnxClassifier {
    /// Load ONNX model from bytes
    pub fn from_bytes(model_bytes: &[u8]) -> Result<Self, PredictionError> {
        let session = Session::builder()
            .map_err(|e| PredictionError::Backend(format!("Session builder error: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| PredictionError::Backend(format!("Optimization error: {}", e)))?
            .commit_from_memory(model_bytes)
            .map_err(|e| PredictionError::Backend(format!("Load from memory error: {}", e)))?;

        let output_name = session
            .outputs
            .first()
            .map(|o| o.name.clone())
            .ok_or_else(|| PredictionError::Backend("No output defined".to_string()))?;

        Ok(Self {
            session: Mutex::new(session),
            output_name,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f32>, PredictionError> {
        let input_tensor = Value::from_array(matrix.values().to_owned())
            .map_err(|e| PredictionError::Shape(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictionError::Backend(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| PredictionError::Backend("No output".to_string()))?;

        if let Ok((_, data)) = output.try_extract_tensor::<f32>() {
            return Ok(data.to_vec());
        }

        let (_, labels) = output
            .try_extract_tensor::<i64>()
            .map_err(|e| PredictionError::Backend(format!("Extract error: {}", e)))?;

        Ok(labels.iter().map(|&l| l as f32).collect())
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
