//! Classifier capability
//!
//! One score (or label) per input row. Implementations are interchangeable
//! and never mutated after load.

use thiserror::Error;

use crate::logic::ingest::FeatureMatrix;

#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("inference backend failed: {0}")]
    Backend(String),

    #[error("expected {expected} predictions, model returned {found}")]
    RowCountMismatch { expected: usize, found: usize },

    #[error("input shape rejected: {0}")]
    Shape(String),

    #[error("no flow records left to classify")]
    EmptyBatch,
}

/// Trait for prediction backends (ONNX, linear, ...)
pub trait Classifier: Send + Sync {
    /// Score every row of `matrix`, in row order
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f32>, PredictionError>;

    /// Short backend name for logs
    fn backend(&self) -> &'static str;
}

/// Run `predict` and check that exactly one score came back per row
pub fn predict_checked(
    classifier: &dyn Classifier,
    matrix: &FeatureMatrix,
) -> Result<Vec<f32>, PredictionError> {
    let scores = classifier.predict(matrix)?;
    if scores.len() != matrix.rows() {
        return Err(PredictionError::RowCountMismatch {
            expected: matrix.rows(),
            found: scores.len(),
        });
    }
    Ok(scores)
}
