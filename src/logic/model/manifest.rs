//! Model Manifest
//!
//! Ordered list of `label → artifact`. Order of `models` is the cascade
//! order; the `primary` entry is the gate.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::registry::RegistryLoadError;

/// Reserved label for the primary verdict gate
pub const PRIMARY_LABEL: &str = "primary";

/// Specialists shipped with the reference deployment, in evaluation order
pub const DEFAULT_CASCADE: &[&str] = &[
    "bot",
    "ddos",
    "ddoshulk",
    "ddosgoldeneye",
    "dosslowhttptest",
    "dosslowloris",
    "ftppatator",
    "infiltration",
    "sshpatator",
    "webattackbruteforce",
    "webattacksqlinjection",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub label: String,
    pub path: PathBuf,
    /// Hex sha256 of the artifact; checked at load when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    pub models: Vec<ModelEntry>,
}

impl ModelManifest {
    /// Primary plus the default cascade, each at `<dir>/<label>.onnx`
    pub fn default_for_dir(dir: &Path) -> Self {
        let models = std::iter::once(PRIMARY_LABEL)
            .chain(DEFAULT_CASCADE.iter().copied())
            .map(|label| ModelEntry {
                label: label.to_string(),
                path: dir.join(format!("{}.onnx", label)),
                sha256: None,
            })
            .collect();

        Self { models }
    }

    /// Load a JSON manifest. Relative artifact paths resolve against the
    /// manifest's own directory.
    pub fn from_file(path: &Path) -> Result<Self, RegistryLoadError> {
        let content = fs::read(path).map_err(|source| RegistryLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut manifest: ModelManifest = serde_json::from_slice(&content)
            .map_err(|e| RegistryLoadError::Manifest(format!("{}: {}", path.display(), e)))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for entry in &mut manifest.models {
            if entry.path.is_relative() {
                entry.path = base.join(&entry.path);
            }
        }

        Ok(manifest)
    }

    pub fn primary(&self) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.label == PRIMARY_LABEL)
    }

    /// Specialist entries, in manifest order
    pub fn cascade(&self) -> impl Iterator<Item = &ModelEntry> {
        self.models.iter().filter(|m| m.label != PRIMARY_LABEL)
    }
}
