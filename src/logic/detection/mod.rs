//! Detection Module - Verdict and attack attribution
//!
//! Primary gate decides benign vs malicious; the cascade of specialists
//! names the attack by strict-majority vote, first match wins.

pub mod cascade;
pub mod gate;
pub mod pipeline;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export common types
pub use pipeline::{AnalysisError, Detector};
pub use types::{Overall, Verdict};
