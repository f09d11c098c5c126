//! CSV Ingestion
//!
//! Order matters:
//! 1. drop rows with a missing field
//! 2. drop rows that spell out infinity
//! 3. coerce every field to a number (unparseable → missing)
//! 4. overflowing values (±inf) → missing
//! 5. missing → 0
//!
//! Only steps 1-2 remove rows.

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;

use super::matrix::FeatureMatrix;

// ============================================================================
// SENTINELS
// ============================================================================

/// Spellings treated as a missing value in a raw CSV cell (after trimming)
const MISSING_SENTINELS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// Spellings of infinity (trimmed, compared case-insensitively)
const INFINITY_SENTINELS: &[&str] = &[
    "inf", "+inf", "-inf", "infinity", "+infinity", "-infinity",
];

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input is not valid CSV: {0}")]
    Malformed(String),

    #[error("input has no header row")]
    Empty,

    #[error("line {line}: expected {expected} fields, found {found}")]
    RaggedRow { line: u64, expected: usize, found: usize },
}

impl From<csv::Error> for IngestError {
    fn from(err: csv::Error) -> Self {
        IngestError::Malformed(err.to_string())
    }
}

// ============================================================================
// INGESTION
// ============================================================================

#[derive(Debug, Default)]
struct IngestStats {
    rows_read: usize,
    dropped_missing: usize,
    dropped_infinite: usize,
    cells_zeroed: usize,
}

/// Parse a raw CSV payload into a finite feature matrix
pub fn ingest(raw: &[u8]) -> Result<FeatureMatrix, IngestError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(raw);

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if columns.is_empty() {
        return Err(IngestError::Empty);
    }

    let mut stats = IngestStats::default();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result?;
        stats.rows_read += 1;

        if record.len() > columns.len() {
            return Err(IngestError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected: columns.len(),
                found: record.len(),
            });
        }

        // A short row leaves trailing columns missing
        if record.len() < columns.len() || record.iter().any(is_missing) {
            stats.dropped_missing += 1;
            continue;
        }

        if record.iter().any(is_infinity) {
            stats.dropped_infinite += 1;
            continue;
        }

        rows.push(coerce_row(&record, &mut stats));
    }

    tracing::debug!(
        "Ingested {} rows ({} dropped missing, {} dropped infinite, {} cells zeroed)",
        stats.rows_read,
        stats.dropped_missing,
        stats.dropped_infinite,
        stats.cells_zeroed
    );

    FeatureMatrix::from_rows(columns, rows).map_err(|e| IngestError::Malformed(e.to_string()))
}

fn is_missing(field: &str) -> bool {
    MISSING_SENTINELS.contains(&field.trim())
}

fn is_infinity(field: &str) -> bool {
    let trimmed = field.trim();
    INFINITY_SENTINELS.iter().any(|s| s.eq_ignore_ascii_case(trimmed))
}

fn coerce_row(record: &StringRecord, stats: &mut IngestStats) -> Vec<f32> {
    record
        .iter()
        .map(|field| match coerce_field(field) {
            Some(v) => v,
            None => {
                stats.cells_zeroed += 1;
                0.0
            }
        })
        .collect()
}

/// `None` is "missing": unparseable, or not representable as a finite f32
fn coerce_field(field: &str) -> Option<f32> {
    let parsed: f64 = field.trim().parse().ok()?;
    let narrowed = parsed as f32;
    narrowed.is_finite().then_some(narrowed)
}
