//! Document round trip: download, export, upload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::models::{OperationResult, SheetType, SrsRecord};
use crate::sheet::{read_workbook, write_workbook};
use crate::transport::FileTransport;

use super::mapper::map_records;
use super::orchestrator::{ExportRequest, TimesheetExporter};
use super::stats::ExportStats;

/// An export against a stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentExportRequest {
    /// Path of the workbook in the document store.
    pub path: String,
    /// The day to export.
    pub date: NaiveDate,
    /// Sheet type of the staff member's template.
    pub sheet_type: SheetType,
    /// Every record the staff member has; the day's checked, live ones are
    /// exported.
    pub records: Vec<SrsRecord>,
}

/// Exports a day's records into a stored workbook.
///
/// Downloads the workbook, exports the matching records, and uploads the
/// result to the same path. Nothing is uploaded unless the export
/// succeeded, so a failed export never leaves a half-written document.
///
/// # Returns
///
/// The export's [`OperationResult`]. It is marked failed with:
/// - `MissingFilePath` if `path` is blank (checked before anything else)
/// - `NoExportableRecords` if no record is checked, live, and on `date`
/// - `DownloadFailed`/`UnreadableWorkbook` if the document cannot be read
/// - `EncodeFailed` if the workbook cannot be serialized
/// - `UploadFailed` if the transport errors or declines the upload
pub async fn export_to_document(
    transport: &dyn FileTransport,
    exporter: &TimesheetExporter,
    request: &DocumentExportRequest,
) -> OperationResult {
    let path = request.path.trim();
    let search = exporter.layout().settings().format_date(request.date);

    if path.is_empty() {
        return ExportStats::start(&search).fail(ExportError::MissingFilePath);
    }

    let records = map_records(&request.records, request.date);
    if records.is_empty() {
        return ExportStats::start(&search).fail(ExportError::NoExportableRecords);
    }
    tracing::info!(path = %path, date = %search, records = records.len(), "exporting to document");

    let bytes = match transport.download_file(path).await {
        Ok(bytes) => bytes,
        Err(error) => return ExportStats::start(&search).fail(error),
    };

    let export = ExportRequest {
        date: search,
        sheet_type: request.sheet_type.number(),
        records,
    };
    let (mut result, patched) = patch_workbook(exporter, &bytes, &export);
    let Some(patched) = patched else {
        return result;
    };

    match transport.upload_file(path, patched).await {
        Ok(true) => {
            tracing::info!(path = %path, "document uploaded");
        }
        Ok(false) => result.mark_failed(ExportError::UploadFailed {
            path: path.to_string(),
            message: "the document store declined the upload".to_string(),
        }),
        Err(error @ ExportError::UploadFailed { .. }) => result.mark_failed(error),
        Err(error) => result.mark_failed(ExportError::UploadFailed {
            path: path.to_string(),
            message: error.to_string(),
        }),
    }
    result
}

/// Parses, exports, and re-encodes a workbook.
///
/// Returns the bytes to upload only when the export succeeded.
fn patch_workbook(
    exporter: &TimesheetExporter,
    bytes: &[u8],
    request: &ExportRequest,
) -> (OperationResult, Option<Vec<u8>>) {
    let mut book = match read_workbook(bytes) {
        Ok(book) => book,
        Err(error) => return (ExportStats::start(&request.date).fail(error), None),
    };

    let mut result = exporter.export(Some(&mut book), request);
    if !result.success {
        return (result, None);
    }

    match write_workbook(&book) {
        Ok(patched) => (result, Some(patched)),
        Err(error) => {
            result.mark_failed(error);
            (result, None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateLayout;
    use crate::error::ErrorKind;
    use crate::models::WorkTime;
    use crate::transport::MemoryTransport;

    const PATH: &str = "srs/2026-01.xlsx";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    fn template_bytes() -> Vec<u8> {
        let mut book = umya_spreadsheet::new_file();
        book.new_sheet("Timesheet").unwrap();
        let sheet = book.get_sheet_by_name_mut("Timesheet").unwrap();
        sheet.get_cell_mut("A11").set_value_string("15/01/2026");
        write_workbook(&book).unwrap()
    }

    fn record(date: &str) -> SrsRecord {
        SrsRecord {
            id: "srs_001".to_string(),
            date: date.to_string(),
            checked: true,
            deleted: false,
            start_work: WorkTime {
                hours: 8,
                minutes: 0,
            },
            finish_work: WorkTime {
                hours: 16,
                minutes: 0,
            },
            lunch: "30".to_string(),
            contract: "1".to_string(),
            type_of_leave: "0".to_string(),
            time_leave: "0".to_string(),
            lunch_note: None,
            total_hours_note: None,
            leave_note: None,
        }
    }

    fn request(path: &str, records: Vec<SrsRecord>) -> DocumentExportRequest {
        DocumentExportRequest {
            path: path.to_string(),
            date: date(),
            sheet_type: SheetType::Type2,
            records,
        }
    }

    fn exporter() -> TimesheetExporter {
        TimesheetExporter::new(TemplateLayout::standard().unwrap())
    }

    #[tokio::test]
    async fn test_round_trip_uploads_patched_workbook() {
        let transport = MemoryTransport::new().with_file(PATH, template_bytes());

        let result =
            export_to_document(&transport, &exporter(), &request(PATH, vec![record("2026-01-15")]))
                .await;

        assert!(result.success, "{:?}", result.errors);
        assert_eq!(result.cells_updated, 4);
        let uploaded = read_workbook(&transport.file(PATH).await.unwrap()).unwrap();
        let sheet = uploaded.get_sheet_by_name("Timesheet").unwrap();
        assert_eq!(sheet.get_cell("F11").unwrap().get_value_number(), Some(7.5));
    }

    #[tokio::test]
    async fn test_blank_path_checked_first() {
        let transport = MemoryTransport::new();

        let result = export_to_document(&transport, &exporter(), &request("  ", vec![])).await;

        assert_eq!(result.error_messages(), vec!["No file path supplied".to_string()]);
        assert_eq!(result.failure_kind(), Some(ErrorKind::InvalidInput));
    }

    #[tokio::test]
    async fn test_no_matching_records() {
        let original = template_bytes();
        let transport = MemoryTransport::new().with_file(PATH, original.clone());
        let mut unchecked = record("2026-01-15");
        unchecked.checked = false;

        let result = export_to_document(
            &transport,
            &exporter(),
            &request(PATH, vec![unchecked, record("2026-01-16")]),
        )
        .await;

        assert_eq!(result.failure_kind(), Some(ErrorKind::NoExportableRecords));
        assert_eq!(transport.file(PATH).await, Some(original));
    }

    #[tokio::test]
    async fn test_missing_document_is_transport_failure() {
        let transport = MemoryTransport::new();

        let result =
            export_to_document(&transport, &exporter(), &request(PATH, vec![record("2026-01-15")]))
                .await;

        assert_eq!(result.failure_kind(), Some(ErrorKind::Transport));
    }

    #[tokio::test]
    async fn test_failed_export_is_not_uploaded() {
        let original = template_bytes();
        let transport = MemoryTransport::new().with_file(PATH, original.clone());
        let mut req = request(PATH, vec![record("2026-01-20")]);
        req.date = NaiveDate::from_ymd_opt(2026, 1, 20).unwrap();

        let result = export_to_document(&transport, &exporter(), &req).await;

        assert_eq!(result.failure_kind(), Some(ErrorKind::DateNotFound));
        assert_eq!(transport.file(PATH).await, Some(original));
    }

    #[tokio::test]
    async fn test_declined_upload_marks_failure() {
        let transport = MemoryTransport::new().with_file(PATH, template_bytes());
        transport.reject_uploads(true);

        let result =
            export_to_document(&transport, &exporter(), &request(PATH, vec![record("2026-01-15")]))
                .await;

        assert!(!result.success);
        assert_eq!(result.failure_kind(), Some(ErrorKind::UploadFailed));
        assert_eq!(result.cells_updated, 4);
    }

    #[tokio::test]
    async fn test_garbage_bytes_are_invalid_input() {
        let transport = MemoryTransport::new().with_file(PATH, b"not a workbook".to_vec());

        let result =
            export_to_document(&transport, &exporter(), &request(PATH, vec![record("2026-01-15")]))
                .await;

        assert_eq!(result.failure_kind(), Some(ErrorKind::InvalidInput));
    }
}
