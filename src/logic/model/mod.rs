//! Model Module - Classifier capabilities and registry
//!
//! Artifacts are opaque: the rest of the service only sees `Classifier`.
//! Easy to swap backends, one registry built once at startup.

pub mod classifier;
pub mod linear;
pub mod manifest;
pub mod onnx;
pub mod registry;

#[cfg(test)]
pub(crate) mod testing;

// Re-export common types
pub use classifier::{Classifier, PredictionError};
pub use manifest::ModelManifest;
pub use registry::{ClassifierRegistry, RegistryLoadError, Specialist};
