//! Request types for the SRS export API.
//!
//! This module defines the JSON request structure for the `/export` endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::export::DocumentExportRequest;
use crate::models::{SheetType, SrsRecord};

/// Request body for the `/export` endpoint.
///
/// Carries everything needed to export one day for one staff member:
/// where their workbook lives, which day, their sheet type setting, and
/// their timesheet records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocumentRequest {
    /// Path of the staff member's workbook in the document store.
    pub path: String,
    /// The day to export.
    pub date: NaiveDate,
    /// The staff member's sheet type setting (`"2"` or `"3"`); type 2 when
    /// missing or unrecognised.
    #[serde(default)]
    pub staff_type: Option<String>,
    /// The staff member's timesheet records.
    #[serde(default)]
    pub records: Vec<SrsRecord>,
}

impl From<ExportDocumentRequest> for DocumentExportRequest {
    fn from(req: ExportDocumentRequest) -> Self {
        DocumentExportRequest {
            path: req.path,
            date: req.date,
            sheet_type: SheetType::from_staff_setting(req.staff_type.as_deref()),
            records: req.records,
        }
    }
}
