//! Core data models for the SRS export engine.
//!
//! This module contains all the domain models used throughout the engine.

mod export_record;
mod operation_result;
mod srs_record;
mod time_of_day;

pub use export_record::{ExportBatch, ExportRecord, MAX_LEAVE_TYPE_ID, SheetType};
pub use operation_result::{ExportIssue, OperationResult};
pub use srs_record::{SrsRecord, WorkTime};
pub use time_of_day::{MINUTES_PER_DAY, TimeOfDay};
