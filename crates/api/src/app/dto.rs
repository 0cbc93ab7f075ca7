//! Request/response DTOs and JSON mapping helpers.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;

use stocktake_core::DomainError;
use stocktake_inventory::DiscrepancyRecord;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct UploadCsvRequest {
    /// Base64-encoded CSV payload.
    pub data: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyItemRequest {
    pub barcode: String,
    pub storage_location: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscrepancyQueryParams {
    /// Calendar date, `YYYY-MM-DD`.
    pub scanning_date: Option<String>,
    pub storage_location: Option<String>,
}

// -------------------------
// Payload decoding
// -------------------------

/// Decode the upload payload to UTF-8 text at the transport boundary; the
/// core only ever sees decoded text.
pub fn decode_base64_utf8(data: &str) -> Result<String, DomainError> {
    let bytes = BASE64
        .decode(data.trim())
        .map_err(|e| DomainError::validation(format!("payload is not valid base64: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| DomainError::validation(format!("payload is not valid UTF-8: {e}")))
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn discrepancy_to_json(record: &DiscrepancyRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "barcode": record.barcode.to_string(),
        "scanned_at": record.scanned_at.to_rfc3339(),
        "actual_location": record.actual_location,
    })
}
