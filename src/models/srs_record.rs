//! Timesheet records as delivered by the record layer.
//!
//! Field names follow the record layer's JSON shape, so numeric values
//! such as contract and leave hours arrive as strings and are only
//! interpreted by the record mapper.

use serde::{Deserialize, Serialize};

/// An hours/minutes pair as stored on a timesheet record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkTime {
    /// Hour of day.
    #[serde(default)]
    pub hours: u32,
    /// Minute of hour.
    #[serde(default)]
    pub minutes: u32,
}

/// One day of a staff member's timesheet (SRS).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsRecord {
    /// Record identifier in the record layer.
    pub id: String,
    /// Calendar date, `YYYY-MM-DD` or a timestamp starting with it.
    pub date: String,
    /// Whether the record is selected for export.
    #[serde(default)]
    pub checked: bool,
    /// Soft-delete marker.
    #[serde(default)]
    pub deleted: bool,
    /// Shift start.
    #[serde(default)]
    pub start_work: WorkTime,
    /// Shift end.
    #[serde(default)]
    pub finish_work: WorkTime,
    /// Lunch duration in minutes.
    #[serde(default)]
    pub lunch: String,
    /// Contract number ("1" or "2").
    #[serde(default)]
    pub contract: String,
    /// Leave type id ("0" for an ordinary working day).
    #[serde(default)]
    pub type_of_leave: String,
    /// Leave hours as a decimal string.
    #[serde(default)]
    pub time_leave: String,
    /// Note attached to the lunch cell.
    #[serde(default)]
    pub lunch_note: Option<String>,
    /// Note attached to the total-hours cell.
    #[serde(default)]
    pub total_hours_note: Option<String>,
    /// Note attached to the leave-hours cell.
    #[serde(default)]
    pub leave_note: Option<String>,
}
