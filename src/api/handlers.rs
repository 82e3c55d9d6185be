//! HTTP request handlers for the SRS export API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::export::export_to_document;

use super::request::ExportDocumentRequest;
use super::response::{ApiError, ApiErrorResponse, ExportResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/export", post(export_handler))
        .with_state(state)
}

/// Handler for POST /export endpoint.
///
/// Downloads the workbook named in the request, exports the day's records
/// into it, and uploads the result. Responds with the export statistics;
/// the status code reflects the kind of fatal error, if any.
async fn export_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExportDocumentRequest>, JsonRejection>,
) -> impl IntoResponse {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing export request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = rejection_error(correlation_id, rejection);
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    let path = request.path.clone();
    let record_count = request.records.len();
    let start_time = Instant::now();
    let result = export_to_document(
        state.transport(),
        state.exporter(),
        &request.into(),
    )
    .await;
    let duration = start_time.elapsed();

    if result.success {
        info!(
            correlation_id = %correlation_id,
            path = %path,
            records_submitted = record_count,
            records_processed = result.records_processed,
            cells_updated = result.cells_updated,
            duration_us = duration.as_micros(),
            "Export completed successfully"
        );
    } else {
        warn!(
            correlation_id = %correlation_id,
            path = %path,
            errors = ?result.error_messages(),
            "Export failed"
        );
    }

    ExportResponse::new(correlation_id, result).into_response()
}

/// Converts a JSON extraction failure into an API error.
fn rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}
