//! Export orchestration.
//!
//! [`TimesheetExporter`] drives one export through its phases: validate
//! the inputs and records, locate the date row, clear the row block, write
//! each record, and assemble the [`OperationResult`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::config::{SheetLayout, TemplateLayout};
use crate::error::{ExportError, ExportResult};
use crate::logging::{ExportLogger, TracingLogger};
use crate::models::{ExportBatch, ExportIssue, ExportRecord, OperationResult, SheetType};
use crate::sheet::{SheetCells, Workbook};

use super::cleaner::BlockCleaner;
use super::locator::locate_date_row;
use super::resolver::{ColumnResolver, LeaveTarget};
use super::stats::{ExportStats, RecordOutcome};
use super::total_hours::compute_total_hours;
use super::validator::validate_records;
use super::writer::{CellFormat, write_decimal, write_note, write_time};

/// The phases of one export, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportPhase {
    /// Input and record checks; nothing has been touched.
    Validating,
    /// Searching the date column.
    Locating,
    /// Blanking the row block.
    Clearing,
    /// Writing records.
    Processing,
    /// Assembling the result.
    Finalizing,
}

impl fmt::Display for ExportPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportPhase::Validating => "validating",
            ExportPhase::Locating => "locating",
            ExportPhase::Clearing => "clearing",
            ExportPhase::Processing => "processing",
            ExportPhase::Finalizing => "finalizing",
        };
        f.write_str(name)
    }
}

/// One export invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    /// The date as the template displays it, e.g. `15/01/2026`.
    pub date: String,
    /// Sheet type selector; 2 or 3.
    pub sheet_type: u8,
    /// Records in row order.
    pub records: Vec<ExportRecord>,
}

/// Patches a day's records into the timesheet template.
///
/// The exporter holds no per-export state: every call to
/// [`export`](Self::export) starts from scratch, and the same exporter can
/// serve concurrent requests against different workbooks.
///
/// # Example
///
/// ```
/// use srs_export::config::TemplateLayout;
/// use srs_export::export::{ExportRequest, TimesheetExporter};
/// use srs_export::models::{ExportRecord, TimeOfDay};
/// use srs_export::sheet::{ColumnRef, MemorySheet, MemoryWorkbook};
///
/// let layout = TemplateLayout::standard().unwrap();
/// let mut sheet = MemorySheet::new();
/// sheet.set_text(ColumnRef::parse("A").unwrap().at(11), "15/01/2026");
/// let mut workbook = MemoryWorkbook::new().with_sheet("Timesheet", sheet);
///
/// let request = ExportRequest {
///     date: "15/01/2026".to_string(),
///     sheet_type: 2,
///     records: vec![ExportRecord::work_day(
///         TimeOfDay::new(8, 0),
///         TimeOfDay::new(16, 0),
///         TimeOfDay::new(0, 30),
///         1,
///     )],
/// };
///
/// let result = TimesheetExporter::new(layout).export(Some(&mut workbook), &request);
/// assert!(result.success);
/// assert_eq!(result.cells_updated, 4);
/// ```
#[derive(Clone)]
pub struct TimesheetExporter {
    layout: Arc<TemplateLayout>,
    logger: Arc<dyn ExportLogger>,
}

impl fmt::Debug for TimesheetExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimesheetExporter")
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

impl TimesheetExporter {
    /// Creates an exporter that logs through `tracing`.
    pub fn new(layout: TemplateLayout) -> Self {
        Self::with_logger(layout, Arc::new(TracingLogger))
    }

    /// Creates an exporter with an injected logger.
    pub fn with_logger(layout: TemplateLayout, logger: Arc<dyn ExportLogger>) -> Self {
        Self {
            layout: Arc::new(layout),
            logger,
        }
    }

    /// Returns the template layout.
    pub fn layout(&self) -> &TemplateLayout {
        &self.layout
    }

    /// Runs one export against a workbook.
    ///
    /// Never panics and never returns an error: fatal problems come back
    /// as `success: false` with the error in `errors`, per-record problems
    /// are listed in `errors` alongside a successful result.
    ///
    /// The workbook is not modified when the export fails before the
    /// clearing phase, which covers every input, record, and date lookup
    /// failure.
    pub fn export<W: Workbook + ?Sized>(
        &self,
        workbook: Option<&mut W>,
        request: &ExportRequest,
    ) -> OperationResult {
        let target = request.date.trim();
        let mut stats = ExportStats::start(target);
        self.log(
            Level::INFO,
            "export.started",
            &[
                ("date", target.to_string()),
                ("sheet_type", request.sheet_type.to_string()),
                ("records", request.records.len().to_string()),
            ],
        );

        match self.run(workbook, request, target, &mut stats) {
            Ok(()) => {
                self.enter(ExportPhase::Finalizing);
                let result = stats.finish();
                self.log(
                    Level::INFO,
                    "export.completed",
                    &[
                        ("records_processed", result.records_processed.to_string()),
                        ("cells_updated", result.cells_updated.to_string()),
                        ("cells_cleared", result.cells_cleared.to_string()),
                        ("comments_added", result.comments_added.to_string()),
                        ("errors", result.errors.len().to_string()),
                        ("duration_ms", result.processing_time_ms.to_string()),
                    ],
                );
                result
            }
            Err(error) => {
                self.log(
                    Level::ERROR,
                    "export.failed",
                    &[
                        ("kind", format!("{:?}", error.kind())),
                        ("error", error.to_string()),
                    ],
                );
                stats.fail(error)
            }
        }
    }

    fn run<W: Workbook + ?Sized>(
        &self,
        workbook: Option<&mut W>,
        request: &ExportRequest,
        target: &str,
        stats: &mut ExportStats,
    ) -> ExportResult<()> {
        let settings = self.layout.settings();

        // Step 1: Validate inputs and records
        self.enter(ExportPhase::Validating);
        let workbook = workbook.ok_or(ExportError::MissingWorkbook)?;
        let sheet = workbook
            .sheet_mut(&settings.sheet_name)
            .ok_or_else(|| ExportError::MissingWorksheet {
                name: settings.sheet_name.clone(),
            })?;
        if target.is_empty() {
            return Err(ExportError::EmptyDate);
        }
        let sheet_type = SheetType::try_from(request.sheet_type)?;
        let sheet_layout =
            self.layout
                .sheet_layout(sheet_type)
                .ok_or_else(|| ExportError::InvalidLayout {
                    message: format!("no layout for sheet type {}", sheet_type),
                })?;
        if request.records.is_empty() {
            return Err(ExportError::EmptyRecordList);
        }
        let batch = self.build_batch(sheet_layout, &request.records, stats)?;

        // Step 2: Locate the date row
        self.enter(ExportPhase::Locating);
        let base_row = locate_date_row(&*sheet, settings, target)?;
        stats.record_located(base_row);
        self.log(
            Level::INFO,
            "export.date_located",
            &[
                ("date", target.to_string()),
                ("row", (base_row + 1).to_string()),
            ],
        );

        // Step 3: Clear the row block
        self.enter(ExportPhase::Clearing);
        let report = BlockCleaner::new(settings, sheet_layout).clear(sheet, base_row);
        stats.record_cleared(&report);
        self.log(
            Level::DEBUG,
            "export.block_cleared",
            &[
                ("cells", report.cells_cleared.to_string()),
                ("notes", report.comments_cleared.to_string()),
            ],
        );

        // Step 4: Write each record to its row
        self.enter(ExportPhase::Processing);
        let resolver = ColumnResolver::new(&self.layout);
        for ((index, record), row) in batch.iter().zip(base_row + 1..) {
            let outcome = write_record(sheet, &resolver, sheet_type, record, row);
            for error in &outcome.errors {
                self.log(
                    Level::WARN,
                    "export.record_error",
                    &[
                        ("index", index.to_string()),
                        ("row", row.to_string()),
                        ("error", error.to_string()),
                    ],
                );
            }
            self.log(
                Level::DEBUG,
                "export.record_written",
                &[
                    ("index", index.to_string()),
                    ("row", row.to_string()),
                    ("cells", outcome.cells_updated.to_string()),
                    ("notes", outcome.comments_added.to_string()),
                ],
            );
            stats.record_written(index, outcome);
        }

        Ok(())
    }

    /// Validates the records and caps them at the block height.
    fn build_batch(
        &self,
        sheet_layout: &SheetLayout,
        records: &[ExportRecord],
        stats: &mut ExportStats,
    ) -> ExportResult<ExportBatch> {
        let outcome = validate_records(records);
        for error in &outcome.errors {
            self.log(
                Level::WARN,
                "export.record_rejected",
                &[
                    ("index", error.record_index().unwrap_or_default().to_string()),
                    ("error", error.to_string()),
                ],
            );
            stats.add_error(ExportIssue::from(error));
        }
        for warning in outcome.warnings {
            stats.add_warning(warning);
        }
        if outcome.valid.is_empty() {
            return Err(ExportError::NoExportableRecords);
        }

        let (batch, dropped) = ExportBatch::fit(sheet_layout.max_rows, outcome.valid);
        if !dropped.is_empty() {
            let indices = dropped
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            stats.add_warning(format!(
                "{} record(s) do not fit the {}-row block of sheet type {} and were not exported: {}",
                dropped.len(),
                sheet_layout.max_rows,
                sheet_layout.sheet_type,
                indices
            ));
            self.log(
                Level::WARN,
                "export.batch_truncated",
                &[
                    ("max_rows", sheet_layout.max_rows.to_string()),
                    ("dropped", indices),
                ],
            );
        }
        Ok(batch)
    }

    fn enter(&self, phase: ExportPhase) {
        self.log(Level::DEBUG, "export.phase", &[("phase", phase.to_string())]);
    }

    fn log(&self, level: Level, event: &'static str, fields: &[(&'static str, String)]) {
        self.logger.log(level, event, fields);
    }
}

/// Writes one record's cells and notes to a 1-based row.
fn write_record<S: SheetCells + ?Sized>(
    sheet: &mut S,
    resolver: &ColumnResolver<'_>,
    sheet_type: SheetType,
    record: &ExportRecord,
    row: u32,
) -> RecordOutcome {
    let mut outcome = RecordOutcome::default();
    let columns = match resolver.resolve_columns(sheet_type, record.contract, record.leave_type_id) {
        Ok(columns) => columns,
        Err(error) => {
            outcome.errors.push(error);
            return outcome;
        }
    };
    outcome.written = true;

    let start = columns.start.at(row);
    let end = columns.end.at(row);
    let lunch = columns.lunch.at(row);
    let total = columns.total_hours.at(row);
    let hours = compute_total_hours(record.shift_start, record.shift_end, record.lunch_duration);

    outcome.track_cell(write_time(sheet, start, record.shift_start, CellFormat::ClockTime));
    outcome.track_cell(write_time(sheet, end, record.shift_end, CellFormat::ClockTime));
    outcome.track_cell(write_time(sheet, lunch, record.lunch_duration, CellFormat::Duration));
    outcome.track_cell(write_decimal(sheet, total, hours, CellFormat::TotalHours));

    let leave = match columns.leave {
        LeaveTarget::NoLeave => None,
        LeaveTarget::Column(column) => {
            let cell = column.at(row);
            outcome.track_cell(write_decimal(
                sheet,
                cell,
                record.leave_hours,
                CellFormat::LeaveHours,
            ));
            Some(cell)
        }
        LeaveTarget::Unmapped => {
            outcome.errors.push(ExportError::MissingLeaveColumn {
                sheet_type: sheet_type.number(),
                contract: record.contract,
                leave_type_id: record.leave_type_id,
            });
            None
        }
    };

    if let Some(text) = record.lunch_note.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        outcome.track_note(write_note(sheet, lunch, text));
    }
    if let Some(text) = record
        .total_hours_note
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        outcome.track_note(write_note(sheet, total, text));
    }
    if let Some(text) = record.leave_note.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        match leave {
            Some(cell) => outcome.track_note(write_note(sheet, cell, text)),
            None => outcome
                .warnings
                .push("leave note ignored: record has no leave column".to_string()),
        }
    }

    outcome
}
