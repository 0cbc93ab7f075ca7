//! Consistent JSON error responses.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stocktake_infra::{IngestError, StoreError};

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn ingest_error_to_response(err: IngestError) -> axum::response::Response {
    match err {
        // Whole-batch rejection; the message names the first offending line.
        IngestError::Csv(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        IngestError::Store(e) => store_error_to_response(e),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        err.to_string(),
    )
}
