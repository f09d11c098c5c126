//! Primary Verdict Gate
//!
//! One classifier decides benign vs malicious per row. A failure here is
//! fatal to the request: there is no fallback gate. A batch with no rows
//! has no verdict at all.

use super::types::GateOutcome;
use crate::logic::ingest::FeatureMatrix;
use crate::logic::model::classifier::predict_checked;
use crate::logic::model::{Classifier, PredictionError};

/// Scores strictly above this are malicious
pub const MALICIOUS_THRESHOLD: f32 = 0.5;

pub fn gate(
    primary: &dyn Classifier,
    matrix: &FeatureMatrix,
) -> Result<GateOutcome, PredictionError> {
    if matrix.is_empty() {
        return Err(PredictionError::EmptyBatch);
    }

    let scores = predict_checked(primary, matrix)?;
    let labels: Vec<u8> = scores
        .iter()
        .map(|&s| u8::from(s > MALICIOUS_THRESHOLD))
        .collect();

    let malicious_count = labels.iter().filter(|&&l| l == 1).count();

    Ok(GateOutcome {
        benign_count: labels.len() - malicious_count,
        malicious_count,
        labels,
    })
}
