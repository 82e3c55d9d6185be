//! Record mapping functionality.
//!
//! This module turns timesheet records from the record layer into
//! [`ExportRecord`]s. Unparseable numeric fields fall back to defaults here;
//! range checks belong to the validator.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{ExportRecord, MAX_LEAVE_TYPE_ID, SrsRecord, TimeOfDay};

/// Contract used when the record's contract cannot be parsed.
pub const DEFAULT_CONTRACT: u8 = 1;

// Never a valid contract; stands in for integers too large or negative
// for `u8` so the validator rejects them.
const UNREPRESENTABLE_CONTRACT: u8 = 0;

/// Selects the records to export for a date and converts them.
///
/// A record is kept when its date falls on `target`, it is checked for
/// export, and it is not soft-deleted. Input order is preserved; the
/// position in the returned list is the record's row offset in the block.
///
/// # Example
///
/// ```
/// use srs_export::export::map_records;
/// use srs_export::models::{SrsRecord, TimeOfDay, WorkTime};
/// use chrono::NaiveDate;
///
/// let record = SrsRecord {
///     id: "srs_001".to_string(),
///     date: "2026-01-15".to_string(),
///     checked: true,
///     deleted: false,
///     start_work: WorkTime { hours: 8, minutes: 0 },
///     finish_work: WorkTime { hours: 16, minutes: 0 },
///     lunch: "30".to_string(),
///     contract: "1".to_string(),
///     type_of_leave: "0".to_string(),
///     time_leave: "0".to_string(),
///     lunch_note: None,
///     total_hours_note: None,
///     leave_note: None,
/// };
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let mapped = map_records(&[record], date);
/// assert_eq!(mapped.len(), 1);
/// assert_eq!(mapped[0].lunch_duration, TimeOfDay::new(0, 30));
/// ```
pub fn map_records(records: &[SrsRecord], target: NaiveDate) -> Vec<ExportRecord> {
    records
        .iter()
        .filter(|r| r.checked && !r.deleted)
        .filter(|r| normalize_record_date(&r.date) == Some(target))
        .map(to_export_record)
        .collect()
}

/// Converts one record without filtering.
pub fn to_export_record(record: &SrsRecord) -> ExportRecord {
    ExportRecord {
        shift_start: TimeOfDay::new(record.start_work.hours, record.start_work.minutes),
        shift_end: TimeOfDay::new(record.finish_work.hours, record.finish_work.minutes),
        lunch_duration: parse_lunch(&record.lunch),
        contract: parse_contract(&record.contract),
        leave_type_id: parse_leave_type(&record.type_of_leave),
        leave_hours: parse_leave_hours(&record.time_leave),
        lunch_note: clean_note(record.lunch_note.as_deref()),
        total_hours_note: clean_note(record.total_hours_note.as_deref()),
        leave_note: clean_note(record.leave_note.as_deref()),
    }
}

/// Reads the calendar date from a record's date field.
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time part, and RFC 3339
/// timestamps.
pub fn normalize_record_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(prefix) = raw.get(..10)
        && let Ok(date) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d")
    {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| stamp.date_naive())
}

fn parse_contract(raw: &str) -> u8 {
    match raw.trim().parse::<i64>() {
        Ok(value) => u8::try_from(value).unwrap_or(UNREPRESENTABLE_CONTRACT),
        Err(_) => DEFAULT_CONTRACT,
    }
}

fn parse_leave_type(raw: &str) -> u8 {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|id| *id <= MAX_LEAVE_TYPE_ID)
        .unwrap_or(0)
}

fn parse_leave_hours(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

fn parse_lunch(raw: &str) -> TimeOfDay {
    TimeOfDay::from_minutes(raw.trim().parse().unwrap_or(0))
}

fn clean_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}
