//! Detection Pipeline
//!
//! ingest → primary gate → (malicious) cascade → alert hand-off.
//! Runs sequentially in the caller's context; only the alert is detached.

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use super::cascade::evaluate;
use super::gate::gate;
use super::types::{Overall, Verdict};
use crate::logic::alert::{Dispatcher, NotificationEvent};
use crate::logic::ingest::{ingest, FeatureMatrix, IngestError};
use crate::logic::model::{ClassifierRegistry, PredictionError};

/// The only failures a request can surface
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("primary verdict gate failed: {0}")]
    Gate(#[source] PredictionError),
}

pub struct Analysis {
    pub verdict: Verdict,
    /// Pending alert delivery, present only for malicious verdicts
    pub alert: Option<JoinHandle<()>>,
}

#[derive(Clone)]
pub struct Detector {
    registry: Arc<ClassifierRegistry>,
    dispatcher: Dispatcher,
}

impl Detector {
    pub fn new(registry: Arc<ClassifierRegistry>, dispatcher: Dispatcher) -> Self {
        Self { registry, dispatcher }
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Gate, then cascade when anything is malicious. No side effects.
    pub fn classify(&self, matrix: &FeatureMatrix) -> Result<Verdict, PredictionError> {
        let outcome = gate(self.registry.primary(), matrix)?;

        tracing::info!(
            "Primary gate: {} benign, {} malicious",
            outcome.benign_count,
            outcome.malicious_count
        );

        if outcome.malicious_count == 0 {
            return Ok(Verdict::benign(outcome.benign_count));
        }

        let category = evaluate(matrix, self.registry.cascade());

        Ok(Verdict {
            overall: Overall::Malicious,
            benign_count: outcome.benign_count,
            malicious_count: outcome.malicious_count,
            category,
        })
    }

    /// Full request: raw CSV in, verdict out, alert handed off when malicious
    pub fn analyze(&self, raw: &[u8], subject: &str) -> Result<Analysis, AnalysisError> {
        let matrix = ingest(raw)?;
        let verdict = self.classify(&matrix).map_err(AnalysisError::Gate)?;

        tracing::info!(
            "Verdict for {}: {} ({})",
            subject,
            verdict.overall.as_str(),
            verdict.category
        );

        let alert = verdict.is_malicious().then(|| {
            self.dispatcher
                .dispatch(NotificationEvent::new(subject, verdict.category.as_str()))
        });

        Ok(Analysis { verdict, alert })
    }
}
