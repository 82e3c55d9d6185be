//! Result aggregation for one export.

use std::time::Instant;

use crate::error::{ExportError, ExportResult};
use crate::models::{ExportIssue, OperationResult};

use super::cleaner::ClearReport;

/// What happened while writing one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordOutcome {
    /// True once the record's columns resolved and writing was attempted.
    pub written: bool,
    /// Cells written successfully.
    pub cells_updated: usize,
    /// Notes attached successfully.
    pub comments_added: usize,
    /// Per-field failures.
    pub errors: Vec<ExportError>,
    /// Non-fatal observations.
    pub warnings: Vec<String>,
}

impl RecordOutcome {
    /// Counts a cell write, or keeps its error.
    pub fn track_cell(&mut self, result: ExportResult<()>) {
        match result {
            Ok(()) => self.cells_updated += 1,
            Err(error) => self.errors.push(error),
        }
    }

    /// Counts a note write, or keeps its error.
    pub fn track_note(&mut self, result: ExportResult<()>) {
        match result {
            Ok(()) => self.comments_added += 1,
            Err(error) => self.errors.push(error),
        }
    }
}

/// Accumulates counts, errors, and warnings into an [`OperationResult`].
#[derive(Debug)]
pub struct ExportStats {
    started: Instant,
    result: OperationResult,
}

impl ExportStats {
    /// Starts timing an export for a date.
    pub fn start(target_date: &str) -> Self {
        Self {
            started: Instant::now(),
            result: OperationResult {
                success: false,
                failure: None,
                records_processed: 0,
                cells_cleared: 0,
                cells_updated: 0,
                comments_cleared: 0,
                comments_added: 0,
                processing_time_ms: 0,
                errors: Vec::new(),
                warnings: Vec::new(),
                date_row_index: None,
                target_date: (!target_date.is_empty()).then(|| target_date.to_string()),
            },
        }
    }

    /// Records an error that does not stop the export.
    pub fn add_error(&mut self, issue: ExportIssue) {
        self.result.errors.push(issue);
    }

    /// Records a warning.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.result.warnings.push(warning.into());
    }

    /// Records the zero-based row the date was found at.
    pub fn record_located(&mut self, base_row: u32) {
        self.result.date_row_index = Some(base_row);
    }

    /// Adds the counts from clearing the block.
    pub fn record_cleared(&mut self, report: &ClearReport) {
        self.result.cells_cleared += report.cells_cleared;
        self.result.comments_cleared += report.comments_cleared;
    }

    /// Adds one record's outcome; `index` is its position in the request.
    pub fn record_written(&mut self, index: usize, outcome: RecordOutcome) {
        if outcome.written {
            self.result.records_processed += 1;
        }
        self.result.cells_updated += outcome.cells_updated;
        self.result.comments_added += outcome.comments_added;
        self.result.errors.extend(
            outcome
                .errors
                .iter()
                .map(|error| ExportIssue::for_record(index, error)),
        );
        self.result.warnings.extend(
            outcome
                .warnings
                .into_iter()
                .map(|warning| format!("Record {}: {}", index, warning)),
        );
    }

    /// Completes a successful export.
    pub fn finish(mut self) -> OperationResult {
        self.result.success = true;
        self.stamp();
        self.result
    }

    /// Completes an export stopped by a fatal error.
    pub fn fail(mut self, error: ExportError) -> OperationResult {
        self.result.success = false;
        self.result.failure = Some(error.kind());
        self.result.errors.push(ExportIssue::from(&error));
        self.stamp();
        self.result
    }

    fn stamp(&mut self) {
        self.result.processing_time_ms =
            u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_finish_sums_counts() {
        let mut stats = ExportStats::start("15/01/2026");
        stats.record_located(10);
        stats.record_cleared(&ClearReport {
            cells_cleared: 59,
            comments_cleared: 1,
        });
        stats.record_written(
            0,
            RecordOutcome {
                written: true,
                cells_updated: 4,
                comments_added: 1,
                ..Default::default()
            },
        );

        let result = stats.finish();
        assert!(result.success);
        assert_eq!(result.records_processed, 1);
        assert_eq!(result.cells_cleared, 59);
        assert_eq!(result.comments_cleared, 1);
        assert_eq!(result.cells_updated, 4);
        assert_eq!(result.comments_added, 1);
        assert_eq!(result.date_row_index, Some(10));
        assert_eq!(result.target_date.as_deref(), Some("15/01/2026"));
    }

    #[test]
    fn test_record_errors_carry_index() {
        let mut outcome = RecordOutcome::default();
        outcome.track_cell(Ok(()));
        outcome.track_cell(Err(ExportError::CellWriteFailed {
            cell: "D12".to_string(),
            message: "cell is read-only".to_string(),
        }));
        outcome.warnings.push("leave note ignored".to_string());
        outcome.written = true;

        let mut stats = ExportStats::start("15/01/2026");
        stats.record_written(1, outcome);
        let result = stats.finish();

        assert!(result.success);
        assert_eq!(result.cells_updated, 1);
        assert_eq!(result.errors[0].record_index, Some(1));
        assert_eq!(result.errors[0].kind, ErrorKind::CellWriteFailed);
        assert_eq!(result.warnings, vec!["Record 1: leave note ignored".to_string()]);
    }

    #[test]
    fn test_fail_keeps_earlier_errors() {
        let mut stats = ExportStats::start("15/01/2026");
        stats.add_error(ExportIssue::from(ExportError::InvalidRecord {
            index: 0,
            message: "contract 3 is not 1 or 2".to_string(),
        }));

        let result = stats.fail(ExportError::NoExportableRecords);
        assert!(!result.success);
        assert_eq!(result.failure, Some(ErrorKind::NoExportableRecords));
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].message, "No exportable records");
    }

    #[test]
    fn test_empty_date_is_not_recorded() {
        let result = ExportStats::start("").fail(ExportError::EmptyDate);
        assert_eq!(result.target_date, None);
        assert_eq!(result.failure_kind(), Some(ErrorKind::InvalidInput));
    }
}
