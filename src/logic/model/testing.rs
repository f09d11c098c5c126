//! Test doubles for `Classifier`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::classifier::{Classifier, PredictionError};
use crate::logic::ingest::FeatureMatrix;

/// Returns preset scores and counts how often it was asked
pub struct FixedClassifier {
    scores: Scores,
    calls: Arc<AtomicUsize>,
}

enum Scores {
    Constant(f32),
    Sequence(Vec<f32>),
    /// First `n` rows get 1.0, the rest 0.0
    FirstN(usize),
    Fail,
}

impl FixedClassifier {
    pub fn constant(score: f32) -> Self {
        Self::with(Scores::Constant(score))
    }

    pub fn sequence(scores: Vec<f32>) -> Self {
        Self::with(Scores::Sequence(scores))
    }

    pub fn positives(n: usize) -> Self {
        Self::with(Scores::FirstN(n))
    }

    pub fn failing() -> Self {
        Self::with(Scores::Fail)
    }

    fn with(scores: Scores) -> Self {
        Self {
            scores,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared call counter, readable after the classifier is boxed away
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Classifier for FixedClassifier {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f32>, PredictionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let rows = matrix.rows();

        match &self.scores {
            Scores::Constant(s) => Ok(vec![*s; rows]),
            Scores::Sequence(v) => Ok(v.clone()),
            Scores::FirstN(n) => Ok((0..rows).map(|i| if i < *n { 1.0 } else { 0.0 }).collect()),
            Scores::Fail => Err(PredictionError::Backend("simulated failure".to_string())),
        }
    }

    fn backend(&self) -> &'static str {
        "fixed"
    }
}

/// `rows` x 2 matrix of zeros
pub fn batch(rows: usize) -> FeatureMatrix {
    FeatureMatrix::from_rows(
        vec!["f0".to_string(), "f1".to_string()],
        vec![vec![0.0, 0.0]; rows],
    )
    .expect("rectangular")
}
