//! Linear Model backend
//!
//! JSON artifact: `{ "weights": [...], "bias": 0.0, "activation": "sigmoid" }`.
//! `sigmoid` yields a probability (gate style), `step` yields discrete labels
//! (specialist style).

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

use super::classifier::{Classifier, PredictionError};
use crate::logic::ingest::FeatureMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Sigmoid,
    Step,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub weights: Vec<f32>,
    #[serde(default)]
    pub bias: f32,
    pub activation: Activation,
    /// Label emitted by `step` when the margin is positive
    #[serde(default = "default_positive_label")]
    pub positive_label: f32,
    /// Label emitted by `step` otherwise
    #[serde(default)]
    pub negative_label: f32,
}

fn default_positive_label() -> f32 {
    1.0
}

impl LinearModel {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    fn score(&self, margin: f32) -> f32 {
        match self.activation {
            Activation::Sigmoid => 1.0 / (1.0 + (-margin).exp()),
            Activation::Step => {
                if margin > 0.0 {
                    self.positive_label
                } else {
                    self.negative_label
                }
            }
        }
    }
}

impl Classifier for LinearModel {
    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f32>, PredictionError> {
        if matrix.features() != self.weights.len() {
            return Err(PredictionError::Shape(format!(
                "model expects {} features, input has {}",
                self.weights.len(),
                matrix.features()
            )));
        }

        let weights = ArrayView1::from(self.weights.as_slice());
        let margins = matrix.values().dot(&weights);

        Ok(margins.iter().map(|m| self.score(m + self.bias)).collect())
    }

    fn backend(&self) -> &'static str {
        "linear"
    }
}
