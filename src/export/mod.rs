//! Export logic for the SRS timesheet template.
//!
//! This module contains the pieces of one export: record mapping and
//! validation, date row lookup, row block clearing, column resolution,
//! cell writing, total hours calculation, result aggregation, the
//! orchestrator that runs them in order, and the document pipeline that
//! wraps the orchestrator in a download/upload round trip.

mod cleaner;
mod locator;
mod mapper;
mod orchestrator;
mod pipeline;
mod resolver;
mod stats;
mod total_hours;
mod validator;
mod writer;

pub use cleaner::{BlockCleaner, ClearReport};
pub use locator::locate_date_row;
pub use mapper::{DEFAULT_CONTRACT, map_records, normalize_record_date, to_export_record};
pub use orchestrator::{ExportPhase, ExportRequest, TimesheetExporter};
pub use pipeline::{DocumentExportRequest, export_to_document};
pub use resolver::{ColumnResolver, LeaveTarget, RecordColumns};
pub use stats::{ExportStats, RecordOutcome};
pub use total_hours::compute_total_hours;
pub use validator::{
    LEAVE_HOURS_WARNING_THRESHOLD, ValidationOutcome, validate_record, validate_records,
};
pub use writer::{CellFormat, write_decimal, write_note, write_time};
