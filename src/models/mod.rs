//! Wire models

pub mod classification;

pub use classification::ClassificationResponse;
