//! Classification model

use serde::{Deserialize, Serialize};

use crate::logic::detection::{Overall, Verdict};

/// Body of a successful `/upload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(rename = "Prediction")]
    pub prediction: String,
    #[serde(rename = "nonmal")]
    pub benign_count: usize,
    #[serde(rename = "mali")]
    pub malicious_count: usize,
    pub attack: String,
}

impl From<&Verdict> for ClassificationResponse {
    fn from(verdict: &Verdict) -> Self {
        let prediction = match verdict.overall {
            Overall::Benign => "Not Malicious",
            Overall::Malicious => "malicious",
        };

        Self {
            prediction: prediction.to_string(),
            benign_count: verdict.benign_count,
            malicious_count: verdict.malicious_count,
            attack: verdict.category.as_str().to_string(),
        }
    }
}
