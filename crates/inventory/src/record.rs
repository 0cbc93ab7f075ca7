use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stocktake_core::Barcode;

/// A physical inventory item, keyed by barcode.
///
/// Items are created only through CSV ingestion and never mutated afterwards.
/// At most one item exists per barcode; the ingestion engine drops candidates
/// whose barcode is already recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub barcode: Barcode,
    /// Non-empty, trimmed storage location name.
    pub storage_location: String,
    /// Free-text description; may be empty.
    pub description: String,
    /// When the item entered the physical inventory. Never in the future
    /// relative to ingestion time.
    pub created_at: DateTime<Utc>,
}

/// A location mismatch detected during verification, not yet committed to the
/// discrepancy log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub barcode: Barcode,
    /// Server-assigned scan time; never supplied by the caller.
    pub scanned_at: DateTime<Utc>,
    /// The reported location that did not match the recorded one.
    pub actual_location: String,
}

/// A committed discrepancy, assigned its position in the append-only log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscrepancyRecord {
    /// Monotonically increasing log identity, assigned by the store.
    pub id: i64,
    pub barcode: Barcode,
    pub scanned_at: DateTime<Utc>,
    pub actual_location: String,
}

impl DiscrepancyRecord {
    pub fn from_uncommitted(id: i64, discrepancy: Discrepancy) -> Self {
        Self {
            id,
            barcode: discrepancy.barcode,
            scanned_at: discrepancy.scanned_at,
            actual_location: discrepancy.actual_location,
        }
    }
}

/// A single scan event: a barcode and the location the operator reports it at.
///
/// Transient; consumed once by the verification engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    pub barcode: Barcode,
    pub reported_location: String,
}
