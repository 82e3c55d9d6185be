//! Record validation functionality.
//!
//! Structural checks on [`ExportRecord`]s before anything touches the
//! sheet. A failing record is excluded with an error; the rest of the
//! batch carries on.

use rust_decimal::Decimal;

use crate::error::ExportError;
use crate::models::{ExportRecord, MAX_LEAVE_TYPE_ID};

/// Leave hours above this produce a warning.
pub const LEAVE_HOURS_WARNING_THRESHOLD: u32 = 24;

/// The result of validating a list of records.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    /// Records that passed, paired with their index in the submitted list.
    pub valid: Vec<(usize, ExportRecord)>,
    /// One `InvalidRecord` error per excluded record.
    pub errors: Vec<ExportError>,
    /// Observations on records that were kept.
    pub warnings: Vec<String>,
}

/// Validates one record.
///
/// Returns the warnings for a valid record, or an `InvalidRecord` error
/// listing every failed check.
pub fn validate_record(index: usize, record: &ExportRecord) -> Result<Vec<String>, ExportError> {
    let mut problems = Vec::new();

    for (label, time) in [
        ("shift start", record.shift_start),
        ("shift end", record.shift_end),
        ("lunch", record.lunch_duration),
    ] {
        if time.hours > 23 {
            problems.push(format!("{} hour {} is outside 0-23", label, time.hours));
        }
        if time.minutes > 59 {
            problems.push(format!("{} minute {} is outside 0-59", label, time.minutes));
        }
    }
    if !matches!(record.contract, 1 | 2) {
        problems.push(format!("contract {} is not 1 or 2", record.contract));
    }
    if record.leave_type_id > MAX_LEAVE_TYPE_ID {
        problems.push(format!(
            "leave type {} is outside 0-{}",
            record.leave_type_id, MAX_LEAVE_TYPE_ID
        ));
    }
    if record.leave_hours < Decimal::ZERO {
        problems.push(format!("leave hours {} are negative", record.leave_hours));
    }

    if !problems.is_empty() {
        return Err(ExportError::InvalidRecord {
            index,
            message: problems.join("; "),
        });
    }

    let mut warnings = Vec::new();
    if record.leave_hours > Decimal::from(LEAVE_HOURS_WARNING_THRESHOLD) {
        warnings.push(format!(
            "Record {}: leave hours {} exceed {}",
            index, record.leave_hours, LEAVE_HOURS_WARNING_THRESHOLD
        ));
    }
    if record.shift_start == record.shift_end && !record.shift_start.is_midnight() {
        warnings.push(format!(
            "Record {}: shift starts and ends at {}",
            index, record.shift_start
        ));
    }
    if !record.has_leave() && record.leave_hours > Decimal::ZERO {
        warnings.push(format!(
            "Record {}: leave hours {} ignored without a leave type",
            index, record.leave_hours
        ));
    }
    Ok(warnings)
}

/// Validates every record, splitting valid from invalid.
pub fn validate_records(records: &[ExportRecord]) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    for (index, record) in records.iter().enumerate() {
        match validate_record(index, record) {
            Ok(warnings) => {
                outcome.warnings.extend(warnings);
                outcome.valid.push((index, record.clone()));
            }
            Err(error) => outcome.errors.push(error),
        }
    }
    outcome
}
