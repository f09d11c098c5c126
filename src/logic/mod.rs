//! Classification core
//!
//! ```text
//! CSV ──► ingest ──► FeatureMatrix ──► gate ──► cascade ──► Verdict
//!                                                   │
//!                                                   └──► alert (detached)
//! ```

pub mod alert;
pub mod detection;
pub mod ingest;
pub mod model;
