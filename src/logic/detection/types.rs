//! Detection Types
//!
//! Data structures only, no logic.

use serde::{Deserialize, Serialize};

use crate::logic::model::PredictionError;

/// Category reported for a benign batch
pub const NOT_APPLICABLE: &str = "NA";

/// Category reported when no specialist reaches a strict majority
pub const UNKNOWN_ATTACK: &str = "unknown-attack";

// ============================================================================
// VERDICT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overall {
    Benign,
    Malicious,
}

impl Overall {
    pub fn as_str(&self) -> &'static str {
        match self {
            Overall::Benign => "benign",
            Overall::Malicious => "malicious",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Benign batch
    NotApplicable,
    /// Label of the first specialist to reach a strict majority
    Known(String),
    /// Malicious, but no specialist matched
    UnknownAttack,
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::NotApplicable => NOT_APPLICABLE,
            Category::Known(label) => label,
            Category::UnknownAttack => UNKNOWN_ATTACK,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one classification run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub overall: Overall,
    pub benign_count: usize,
    pub malicious_count: usize,
    pub category: Category,
}

impl Verdict {
    pub fn benign(benign_count: usize) -> Self {
        Self {
            overall: Overall::Benign,
            benign_count,
            malicious_count: 0,
            category: Category::NotApplicable,
        }
    }

    pub fn is_malicious(&self) -> bool {
        self.overall == Overall::Malicious
    }
}

// ============================================================================
// STAGE OUTCOMES
// ============================================================================

/// Row-level output of the primary gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    /// 1 = malicious, 0 = benign, one per row
    pub labels: Vec<u8>,
    pub benign_count: usize,
    pub malicious_count: usize,
}

/// What one specialist did with the batch
#[derive(Debug)]
pub enum SpecialistOutcome {
    Matched { inliers: usize },
    BelowMajority { inliers: usize },
    Failed(PredictionError),
}
