//! HTTP API module for the SRS export engine.
//!
//! This module provides the REST endpoint that exports a day's timesheet
//! records into a staff member's workbook in the document store.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ExportDocumentRequest;
pub use response::{status_for_kind, ApiError, ExportResponse};
pub use state::AppState;
