//! Ingest Module - Flow Record Ingestor
//!
//! Raw CSV upload → clean, fully numeric, finite feature matrix.
//! Deterministic, touches nothing but the input buffer.

pub mod matrix;
pub mod parser;


// Re-export common types
pub use matrix::FeatureMatrix;
pub use parser::{ingest, IngestError};
