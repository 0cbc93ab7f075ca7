//! CSV batch parser.
//!
//! Turns a raw delimited payload into inventory item candidates, or the first
//! validation failure. Parsing is fail-fast: one bad line rejects the whole
//! batch, matching the all-or-nothing upload contract.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use stocktake_core::Barcode;

use crate::record::InventoryItem;

/// Validation failure for a CSV batch. Carries the 1-based line number of the
/// first offending line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsvError {
    #[error("line {line}: expected at least 4 fields, got {fields}")]
    MalformedLine { line: usize, fields: usize },

    #[error("line {line}: invalid barcode: {value:?}")]
    InvalidBarcode { line: usize, value: String },

    #[error("line {line}: storage location cannot be empty")]
    EmptyLocation { line: usize },

    #[error("line {line}: invalid or future created date: {value:?}")]
    InvalidDate { line: usize, value: String },
}

/// Parse a CSV payload into inventory item candidates.
///
/// Expected line shape: `barcode, storage_location, description, created_date`
/// (extra trailing fields are ignored). Blank lines are skipped. Candidates
/// are returned in order of appearance; duplicate barcodes within the batch
/// are passed through untouched. Deduplication against the store happens at
/// ingestion.
///
/// `now` is the ingestion-time clock reading used for the future-date check.
pub fn parse_batch(text: &str, now: DateTime<Utc>) -> Result<Vec<InventoryItem>, CsvError> {
    let mut items = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = raw.split(',').collect();
        if fields.len() < 4 {
            return Err(CsvError::MalformedLine {
                line,
                fields: fields.len(),
            });
        }

        let barcode_raw = fields[0].trim();
        let barcode: Barcode = barcode_raw.parse().map_err(|_| CsvError::InvalidBarcode {
            line,
            value: barcode_raw.to_string(),
        })?;

        let storage_location = fields[1].trim();
        if storage_location.is_empty() {
            return Err(CsvError::EmptyLocation { line });
        }

        let created_raw = fields[3].trim();
        let created_at = parse_created_at(created_raw)
            .filter(|t| *t <= now)
            .ok_or_else(|| CsvError::InvalidDate {
                line,
                value: created_raw.to_string(),
            })?;

        items.push(InventoryItem {
            barcode,
            storage_location: storage_location.to_string(),
            description: fields[2].trim().to_string(),
            created_at,
        });
    }

    Ok(items)
}

/// Accepted created-date forms: RFC 3339, naive `YYYY-MM-DDTHH:MM:SS` or
/// `YYYY-MM-DD HH:MM:SS` (taken as UTC), and bare `YYYY-MM-DD` (midnight UTC).
fn parse_created_at(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(t) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}
