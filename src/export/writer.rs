//! Cell writing functionality.
//!
//! Typed values go into cells together with the number format the template
//! displays them with.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{ExportError, ExportResult};
use crate::models::TimeOfDay;
use crate::sheet::{CellRef, SheetCells};

/// Number formats applied to written cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellFormat {
    /// Shift start and end: `h:mm AM/PM`.
    ClockTime,
    /// Lunch duration: `[h]:mm`.
    Duration,
    /// Computed total hours: nine decimal places.
    TotalHours,
    /// Leave hours: two decimal places.
    LeaveHours,
}

impl CellFormat {
    /// The spreadsheet number format code.
    pub fn code(self) -> &'static str {
        match self {
            CellFormat::ClockTime => "h:mm AM/PM",
            CellFormat::Duration => "[h]:mm",
            CellFormat::TotalHours => "0.000000000",
            CellFormat::LeaveHours => "0.00",
        }
    }
}

/// Writes a time value as a day fraction.
pub fn write_time<S: SheetCells + ?Sized>(
    sheet: &mut S,
    cell: CellRef,
    time: TimeOfDay,
    format: CellFormat,
) -> ExportResult<()> {
    let serial = time
        .excel_serial()
        .ok_or_else(|| ExportError::CellWriteFailed {
            cell: cell.to_string(),
            message: format!("{} is not a valid time", time),
        })?;
    sheet.write_number(cell, serial, format.code())
}

/// Writes a decimal number.
pub fn write_decimal<S: SheetCells + ?Sized>(
    sheet: &mut S,
    cell: CellRef,
    value: Decimal,
    format: CellFormat,
) -> ExportResult<()> {
    let number = value.to_f64().ok_or_else(|| ExportError::CellWriteFailed {
        cell: cell.to_string(),
        message: format!("{} does not fit a spreadsheet number", value),
    })?;
    sheet.write_number(cell, number, format.code())
}

/// Replaces the cell's note with `text`.
pub fn write_note<S: SheetCells + ?Sized>(
    sheet: &mut S,
    cell: CellRef,
    text: &str,
) -> ExportResult<()> {
    sheet.remove_note(cell);
    sheet.set_note(cell, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::{ColumnRef, MemorySheet};
    use std::str::FromStr;

    fn cell(letters: &str, row: u32) -> CellRef {
        ColumnRef::parse(letters).unwrap().at(row)
    }

    #[test]
    fn test_format_codes() {
        assert_eq!(CellFormat::ClockTime.code(), "h:mm AM/PM");
        assert_eq!(CellFormat::Duration.code(), "[h]:mm");
        assert_eq!(CellFormat::TotalHours.code(), "0.000000000");
        assert_eq!(CellFormat::LeaveHours.code(), "0.00");
    }

    #[test]
    fn test_write_time_as_day_fraction() {
        let mut sheet = MemorySheet::new();
        write_time(&mut sheet, cell("C", 11), TimeOfDay::new(18, 0), CellFormat::ClockTime)
            .unwrap();

        assert_eq!(sheet.number(cell("C", 11)), Some(0.75));
        assert_eq!(sheet.format_code(cell("C", 11)), Some("h:mm AM/PM"));
    }

    #[test]
    fn test_write_invalid_time_fails() {
        let mut sheet = MemorySheet::new();
        let err = write_time(&mut sheet, cell("C", 11), TimeOfDay::new(24, 0), CellFormat::ClockTime)
            .unwrap_err();

        assert!(matches!(err, ExportError::CellWriteFailed { ref cell, .. } if cell == "C11"));
        assert_eq!(sheet.populated_cells(), 0);
    }

    #[test]
    fn test_write_decimal_with_format() {
        let mut sheet = MemorySheet::new();
        let hours = Decimal::from_str("7.5").unwrap();
        write_decimal(&mut sheet, cell("F", 11), hours, CellFormat::TotalHours).unwrap();

        assert_eq!(sheet.number(cell("F", 11)), Some(7.5));
        assert_eq!(sheet.format_code(cell("F", 11)), Some("0.000000000"));
    }

    #[test]
    fn test_write_note_replaces_existing() {
        let mut sheet = MemorySheet::new();
        sheet.put_note(cell("E", 11), "old");

        write_note(&mut sheet, cell("E", 11), "new").unwrap();

        assert_eq!(sheet.note(cell("E", 11)), Some("new"));
        assert_eq!(sheet.note_count(), 1);
    }

    #[test]
    fn test_read_only_cell_reports_failure() {
        let mut sheet = MemorySheet::new();
        sheet.mark_read_only(cell("D", 11));

        let result = write_time(&mut sheet, cell("D", 11), TimeOfDay::new(16, 0), CellFormat::ClockTime);
        assert_eq!(
            result,
            Err(ExportError::CellWriteFailed {
                cell: "D11".to_string(),
                message: "cell is read-only".to_string(),
            })
        );
    }
}
