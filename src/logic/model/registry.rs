//! Classifier Registry
//!
//! Built once at startup from a manifest, read-only afterwards and shared
//! across requests behind an `Arc`. Any artifact failure aborts the load.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::classifier::Classifier;
use super::linear::LinearModel;
use super::manifest::{ModelEntry, ModelManifest, PRIMARY_LABEL};
use super::onnx::OnnxClassifier;
use crate::logic::detection::types::{NOT_APPLICABLE, UNKNOWN_ATTACK};

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum RegistryLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid manifest: {0}")]
    Manifest(String),

    #[error("artifact for '{label}' failed to load: {message}")]
    Artifact { label: String, message: String },

    #[error("manifest has no '{}' entry", PRIMARY_LABEL)]
    MissingPrimary,

    #[error("label '{0}' appears more than once")]
    DuplicateLabel(String),

    #[error("label '{0}' is reserved")]
    ReservedLabel(String),

    #[error("checksum mismatch for '{label}': expected {expected}, got {actual}")]
    ChecksumMismatch {
        label: String,
        expected: String,
        actual: String,
    },

    #[error("unsupported artifact format: {0}")]
    UnsupportedFormat(PathBuf),
}

// ============================================================================
// REGISTRY
// ============================================================================

/// A labelled cascade member
pub struct Specialist {
    label: String,
    classifier: Box<dyn Classifier>,
}

impl Specialist {
    pub fn new(label: impl Into<String>, classifier: Box<dyn Classifier>) -> Self {
        Self {
            label: label.into(),
            classifier,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn classifier(&self) -> &dyn Classifier {
        self.classifier.as_ref()
    }
}

pub struct ClassifierRegistry {
    primary: Box<dyn Classifier>,
    cascade: Vec<Specialist>,
}

impl ClassifierRegistry {
    /// Assemble from already-loaded classifiers. Cascade order is kept as given.
    pub fn new(
        primary: Box<dyn Classifier>,
        cascade: Vec<Specialist>,
    ) -> Result<Self, RegistryLoadError> {
        let mut seen = HashSet::new();
        for specialist in &cascade {
            check_label(&specialist.label)?;
            if !seen.insert(specialist.label.as_str()) {
                return Err(RegistryLoadError::DuplicateLabel(specialist.label.clone()));
            }
        }

        Ok(Self { primary, cascade })
    }

    /// Load every artifact named by `manifest`
    pub fn load(manifest: &ModelManifest) -> Result<Self, RegistryLoadError> {
        let primaries = manifest
            .models
            .iter()
            .filter(|m| m.label == PRIMARY_LABEL)
            .count();
        match primaries {
            0 => return Err(RegistryLoadError::MissingPrimary),
            1 => {}
            _ => return Err(RegistryLoadError::DuplicateLabel(PRIMARY_LABEL.to_string())),
        }

        let primary_entry = manifest.primary().ok_or(RegistryLoadError::MissingPrimary)?;
        let primary = load_artifact(primary_entry)?;

        let cascade = manifest
            .cascade()
            .map(|entry| load_artifact(entry).map(|c| Specialist::new(entry.label.clone(), c)))
            .collect::<Result<Vec<_>, _>>()?;

        let registry = Self::new(primary, cascade)?;
        tracing::info!(
            "Classifier registry ready: primary + {} specialists",
            registry.cascade.len()
        );
        Ok(registry)
    }

    pub fn primary(&self) -> &dyn Classifier {
        self.primary.as_ref()
    }

    /// Specialists in evaluation order
    pub fn cascade(&self) -> &[Specialist] {
        &self.cascade
    }

    /// Total classifiers held, primary included
    pub fn len(&self) -> usize {
        self.cascade.len() + 1
    }
}

fn check_label(label: &str) -> Result<(), RegistryLoadError> {
    if label.trim().is_empty()
        || label == PRIMARY_LABEL
        || label == NOT_APPLICABLE
        || label == UNKNOWN_ATTACK
    {
        return Err(RegistryLoadError::ReservedLabel(label.to_string()));
    }
    Ok(())
}

// ============================================================================
// ARTIFACT LOADING
// ============================================================================

fn load_artifact(entry: &ModelEntry) -> Result<Box<dyn Classifier>, RegistryLoadError> {
    let bytes = fs::read(&entry.path).map_err(|source| RegistryLoadError::Io {
        path: entry.path.clone(),
        source,
    })?;

    let digest = hex::encode(Sha256::digest(&bytes));
    if let Some(expected) = &entry.sha256 {
        if !expected.eq_ignore_ascii_case(&digest) {
            return Err(RegistryLoadError::ChecksumMismatch {
                label: entry.label.clone(),
                expected: expected.clone(),
                actual: digest,
            });
        }
    }

    let artifact_err = |message: String| RegistryLoadError::Artifact {
        label: entry.label.clone(),
        message,
    };

    let classifier: Box<dyn Classifier> = match extension(&entry.path).as_deref() {
        Some("onnx") => Box::new(
            OnnxClassifier::from_bytes(&bytes).map_err(|e| artifact_err(e.to_string()))?,
        ),
        Some("json") => Box::new(
            LinearModel::from_json(&bytes).map_err(|e| artifact_err(e.to_string()))?,
        ),
        _ => return Err(RegistryLoadError::UnsupportedFormat(entry.path.clone())),
    };

    tracing::info!(
        "Loaded model '{}' from {} ({}, sha256 {})",
        entry.label,
        entry.path.display(),
        classifier.backend(),
        digest
    );

    Ok(classifier)
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}
