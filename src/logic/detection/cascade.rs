//! Attack Cascade Evaluator
//!
//! Specialists run in registration order over the whole batch (not only the
//! rows the gate flagged). The first one whose inlier count is a strict
//! majority names the attack; the rest are never consulted. A failing
//! specialist is logged and skipped.

use super::types::{Category, SpecialistOutcome};
use crate::logic::ingest::FeatureMatrix;
use crate::logic::model::classifier::predict_checked;
use crate::logic::model::Specialist;

/// Label a specialist emits for a row of its attack type
pub const POSITIVE_LABEL: f32 = 1.0;

/// Inliers must exceed this to attribute the category
pub fn majority_threshold(batch_size: usize) -> usize {
    batch_size / 2
}

pub fn count_inliers(labels: &[f32]) -> usize {
    labels.iter().filter(|&&l| l == POSITIVE_LABEL).count()
}

/// Score one specialist against the full batch
pub fn score_specialist(specialist: &Specialist, matrix: &FeatureMatrix) -> SpecialistOutcome {
    match predict_checked(specialist.classifier(), matrix) {
        Ok(labels) => {
            let inliers = count_inliers(&labels);
            if inliers > majority_threshold(matrix.rows()) {
                SpecialistOutcome::Matched { inliers }
            } else {
                SpecialistOutcome::BelowMajority { inliers }
            }
        }
        Err(e) => SpecialistOutcome::Failed(e),
    }
}

pub fn evaluate(matrix: &FeatureMatrix, cascade: &[Specialist]) -> Category {
    let rows = matrix.rows();

    for specialist in cascade {
        match score_specialist(specialist, matrix) {
            SpecialistOutcome::Matched { inliers } => {
                tracing::info!(
                    "Specialist '{}' matched: {}/{} inliers",
                    specialist.label(),
                    inliers,
                    rows
                );
                return Category::Known(specialist.label().to_string());
            }
            SpecialistOutcome::BelowMajority { inliers } => {
                tracing::debug!(
                    "Specialist '{}' below majority: {}/{} inliers",
                    specialist.label(),
                    inliers,
                    rows
                );
            }
            SpecialistOutcome::Failed(e) => {
                tracing::warn!("Specialist '{}' failed, skipping: {}", specialist.label(), e);
            }
        }
    }

    tracing::info!("No specialist reached a majority over {} rows", rows);
    Category::UnknownAttack
}
