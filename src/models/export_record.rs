//! Export-ready records and the batch they travel in.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

use super::TimeOfDay;

/// Highest leave type id the template knows about.
pub const MAX_LEAVE_TYPE_ID: u8 = 19;

/// Layout classifier selecting the column set and row-block height.
///
/// Derived from a staff configuration value; see
/// [`SheetType::from_staff_setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum SheetType {
    /// Two-row blocks.
    Type2,
    /// Three-row blocks.
    Type3,
}

impl SheetType {
    /// The number used for this type in configuration and requests.
    pub fn number(self) -> u8 {
        match self {
            SheetType::Type2 => 2,
            SheetType::Type3 => 3,
        }
    }

    /// Reads the sheet type from a staff configuration value.
    ///
    /// Missing or unrecognised values fall back to [`SheetType::Type2`].
    ///
    /// # Example
    ///
    /// ```
    /// use srs_export::models::SheetType;
    ///
    /// assert_eq!(SheetType::from_staff_setting(Some("3")), SheetType::Type3);
    /// assert_eq!(SheetType::from_staff_setting(Some("x")), SheetType::Type2);
    /// assert_eq!(SheetType::from_staff_setting(None), SheetType::Type2);
    /// ```
    pub fn from_staff_setting(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.trim().parse::<u8>().ok())
            .and_then(|n| SheetType::try_from(n).ok())
            .unwrap_or(SheetType::Type2)
    }
}

impl TryFrom<u8> for SheetType {
    type Error = ExportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(SheetType::Type2),
            3 => Ok(SheetType::Type3),
            _ => Err(ExportError::InvalidSheetType { value }),
        }
    }
}

impl From<SheetType> for u8 {
    fn from(value: SheetType) -> Self {
        value.number()
    }
}

impl fmt::Display for SheetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A single day's values in the shape the template expects.
///
/// `leave_type_id == 0` is an ordinary working day with no leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    /// Shift start.
    pub shift_start: TimeOfDay,
    /// Shift end; may be earlier than the start for an overnight shift.
    pub shift_end: TimeOfDay,
    /// Unpaid lunch duration.
    pub lunch_duration: TimeOfDay,
    /// Contract number, 1 or 2 when valid.
    pub contract: u8,
    /// Leave type id, 0..=19 when valid.
    pub leave_type_id: u8,
    /// Leave hours.
    pub leave_hours: Decimal,
    /// Note for the lunch cell.
    #[serde(default)]
    pub lunch_note: Option<String>,
    /// Note for the total-hours cell.
    #[serde(default)]
    pub total_hours_note: Option<String>,
    /// Note for the leave-hours cell.
    #[serde(default)]
    pub leave_note: Option<String>,
}

impl ExportRecord {
    /// Creates an ordinary working-day record with no leave and no notes.
    pub fn work_day(
        shift_start: TimeOfDay,
        shift_end: TimeOfDay,
        lunch_duration: TimeOfDay,
        contract: u8,
    ) -> Self {
        Self {
            shift_start,
            shift_end,
            lunch_duration,
            contract,
            leave_type_id: 0,
            leave_hours: Decimal::ZERO,
            lunch_note: None,
            total_hours_note: None,
            leave_note: None,
        }
    }

    /// Returns true if this record carries leave.
    pub fn has_leave(&self) -> bool {
        self.leave_type_id > 0
    }
}

/// The validated records for one export, capped at the block height.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportBatch {
    /// Rows available in the block for this sheet type.
    pub max_rows: usize,
    /// Records in row order.
    pub records: Vec<ExportRecord>,
    /// Position of each record in the submitted list.
    pub source_indices: Vec<usize>,
}

impl ExportBatch {
    /// Builds a batch from `(submitted index, record)` pairs, dropping the
    /// ones that do not fit in the block.
    ///
    /// Returns the batch and the submitted indices that were left out.
    pub fn fit(max_rows: usize, mut entries: Vec<(usize, ExportRecord)>) -> (Self, Vec<usize>) {
        let dropped = if entries.len() > max_rows {
            entries
                .split_off(max_rows)
                .into_iter()
                .map(|(index, _)| index)
                .collect()
        } else {
            Vec::new()
        };
        let (source_indices, records) = entries.into_iter().unzip();
        let batch = Self {
            max_rows,
            records,
            source_indices,
        };
        (batch, dropped)
    }

    /// Returns true if the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates `(submitted index, record)` in row order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ExportRecord)> {
        self.source_indices.iter().copied().zip(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(contract: u8) -> ExportRecord {
        ExportRecord::work_day(
            TimeOfDay::new(8, 0),
            TimeOfDay::new(16, 0),
            TimeOfDay::new(0, 30),
            contract,
        )
    }

    #[test]
    fn test_sheet_type_try_from() {
        assert_eq!(SheetType::try_from(2).unwrap(), SheetType::Type2);
        assert_eq!(SheetType::try_from(3).unwrap(), SheetType::Type3);
        assert_eq!(
            SheetType::try_from(4),
            Err(ExportError::InvalidSheetType { value: 4 })
        );
    }

    #[test]
    fn test_sheet_type_serializes_as_number() {
        assert_eq!(serde_json::to_string(&SheetType::Type3).unwrap(), "3");
        let parsed: SheetType = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, SheetType::Type2);
        assert!(serde_json::from_str::<SheetType>("5").is_err());
    }

    #[test]
    fn test_staff_setting_trims_whitespace() {
        assert_eq!(SheetType::from_staff_setting(Some(" 3 ")), SheetType::Type3);
        assert_eq!(SheetType::from_staff_setting(Some("1")), SheetType::Type2);
    }

    #[test]
    fn test_work_day_has_no_leave() {
        let record = sample(1);
        assert!(!record.has_leave());
        assert_eq!(record.leave_hours, Decimal::ZERO);
    }

    #[test]
    fn test_batch_fit_keeps_order_and_reports_dropped() {
        let entries = vec![(0, sample(1)), (2, sample(2)), (3, sample(1))];
        let (batch, dropped) = ExportBatch::fit(2, entries);

        assert_eq!(dropped, vec![3]);
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].contract, 1);
        assert_eq!(batch.records[1].contract, 2);
        let indices: Vec<usize> = batch.iter().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn test_batch_fit_within_capacity() {
        let (batch, dropped) = ExportBatch::fit(3, vec![(0, sample(1))]);
        assert!(dropped.is_empty());
        assert!(!batch.is_empty());
        assert_eq!(batch.max_rows, 3);
    }
}
