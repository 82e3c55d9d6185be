//! Response types for the SRS export API.
//!
//! This module defines the export response body, the error response
//! structure, and the mapping from error kinds to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorKind;
use crate::models::OperationResult;

/// Response body for the `/export` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResponse {
    /// Correlation id of the request, as it appears in the logs.
    pub correlation_id: Uuid,
    /// One-line summary of a successful export.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// The export's statistics and diagnostics.
    #[serde(flatten)]
    pub result: OperationResult,
}

impl ExportResponse {
    /// Wraps an export result.
    pub fn new(correlation_id: Uuid, result: OperationResult) -> Self {
        Self {
            correlation_id,
            summary: result.summary(),
            result,
        }
    }

    /// The HTTP status for this response.
    pub fn status(&self) -> StatusCode {
        if self.result.success {
            return StatusCode::OK;
        }
        self.result
            .failure
            .map(status_for_kind)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ExportResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Maps a fatal error kind to an HTTP status code.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::DateNotFound
        | ErrorKind::NoExportableRecords
        | ErrorKind::InvalidRecord => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::UploadFailed | ErrorKind::Transport => StatusCode::BAD_GATEWAY,
        ErrorKind::FatalConfig | ErrorKind::CellWriteFailed => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    fn failed(error: ExportError) -> OperationResult {
        let mut result = OperationResult {
            success: true,
            failure: None,
            records_processed: 0,
            cells_cleared: 0,
            cells_updated: 0,
            comments_cleared: 0,
            comments_added: 0,
            processing_time_ms: 0,
            errors: vec![],
            warnings: vec![],
            date_row_index: None,
            target_date: Some("15/01/2026".to_string()),
        };
        result.mark_failed(error);
        result
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_status_per_kind() {
        assert_eq!(status_for_kind(ErrorKind::InvalidInput), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_for_kind(ErrorKind::DateNotFound),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(status_for_kind(ErrorKind::UploadFailed), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for_kind(ErrorKind::FatalConfig),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failed_export_response_status() {
        let response = ExportResponse::new(
            Uuid::new_v4(),
            failed(ExportError::DateNotFound {
                date: "15/01/2026".to_string(),
            }),
        );
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.summary, None);
    }

    #[test]
    fn test_into_response_uses_failure_status() {
        let response = ExportResponse::new(Uuid::new_v4(), failed(ExportError::UploadFailed {
            path: "srs/a.xlsx".to_string(),
            message: "declined".to_string(),
        }))
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            response.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[test]
    fn test_response_flattens_result() {
        let response = ExportResponse::new(Uuid::nil(), failed(ExportError::MissingFilePath));
        let json: serde_json::Value = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["failure"], "invalid_input");
        assert_eq!(json["errors"][0]["message"], "No file path supplied");
        assert_eq!(json["correlation_id"], "00000000-0000-0000-0000-000000000000");
        assert!(json.get("summary").is_none());
    }
}
