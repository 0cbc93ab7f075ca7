use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;

use stocktake_core::Barcode;
use stocktake_inventory::{DiscrepancyFilter, ScanEvent};
use stocktake_infra::{DiscrepancyStore, VerifyOutcome};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/upload-csv", post(upload_csv))
        .route("/verify-item", post(verify_item))
        .route("/discrepancies", get(get_discrepancies))
}

pub async fn upload_csv(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::UploadCsvRequest>,
) -> axum::response::Response {
    let csv_text = match dto::decode_base64_utf8(&body.data) {
        Ok(text) => text,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_payload", e.to_string()),
    };

    match services.ingestion.ingest(&csv_text).await {
        Ok(report) => {
            let message = if report.accepted == 0 {
                "no new records to upload".to_string()
            } else {
                format!("{} items uploaded successfully", report.accepted)
            };
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "accepted": report.accepted,
                    "message": message,
                })),
            )
                .into_response()
        }
        Err(e) => errors::ingest_error_to_response(e),
    }
}

pub async fn verify_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::VerifyItemRequest>,
) -> axum::response::Response {
    let barcode: Barcode = match body.barcode.parse() {
        Ok(b) => b,
        Err(e) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_barcode",
                format!("{e}"),
            )
        }
    };

    let scan = ScanEvent {
        barcode,
        reported_location: body.storage_location,
    };

    match services.verification.verify(scan).await {
        Ok(VerifyOutcome::Match) => {
            (StatusCode::OK, Json(serde_json::json!({ "status": "match" }))).into_response()
        }
        Ok(VerifyOutcome::Unknown) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            "no inventory item recorded for barcode",
        ),
        // Detection worked; the negative result is reported to the caller and
        // the record is already committed.
        Ok(VerifyOutcome::Discrepancy(record)) => errors::json_error(
            StatusCode::BAD_REQUEST,
            "location_discrepancy",
            format!(
                "location discrepancy detected: {} reported at {:?}",
                record.barcode, record.actual_location
            ),
        ),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_discrepancies(
    Extension(services): Extension<Arc<AppServices>>,
    Query(params): Query<dto::DiscrepancyQueryParams>,
) -> axum::response::Response {
    let scanned_on = match params
        .scanning_date
        .as_deref()
        .map(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
        .transpose()
    {
        Ok(date) => date,
        Err(_) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "invalid_date_filter",
                "scanning_date must be formatted YYYY-MM-DD",
            )
        }
    };

    let filter = DiscrepancyFilter {
        scanned_on,
        location: params.storage_location,
    };

    match services.discrepancies.query(&filter).await {
        Ok(records) => {
            let body: Vec<_> = records.iter().map(dto::discrepancy_to_json).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
