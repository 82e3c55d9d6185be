//! Spreadsheet access used by the export engine.
//!
//! The engine only needs a handful of cell operations, captured by
//! [`SheetCells`]. They are implemented for `umya_spreadsheet` worksheets
//! (the real `.xlsx` path) and for [`MemorySheet`], an in-memory sheet
//! used by tests and benchmarks.

mod memory;
mod xlsx;

use std::fmt;

use serde::{Deserialize, Serialize};
use umya_spreadsheet::helper::coordinate::{
    coordinate_from_index, index_from_coordinate, string_from_column_index,
};

use crate::error::{ExportError, ExportResult};

pub use memory::{CellValue, MemoryCell, MemorySheet, MemoryWorkbook};
pub use xlsx::{read_workbook, write_workbook};

/// A column identified by its letters (`A`, `AG`), stored 1-based.
///
/// # Example
///
/// ```
/// use srs_export::sheet::ColumnRef;
///
/// let column = ColumnRef::parse("AG").unwrap();
/// assert_eq!(column.index(), 33);
/// assert_eq!(column.to_string(), "AG");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnRef(u32);

impl ColumnRef {
    /// Parses column letters. Accepts one to three ASCII letters.
    pub fn parse(letters: &str) -> ExportResult<Self> {
        let letters = letters.trim().to_ascii_uppercase();
        let invalid = || ExportError::InvalidLayout {
            message: format!("'{}' is not a column", letters),
        };
        if letters.is_empty()
            || letters.len() > 3
            || !letters.bytes().all(|b| b.is_ascii_uppercase())
        {
            return Err(invalid());
        }
        let coordinate = format!("{}1", letters);
        match index_from_coordinate(coordinate.as_str()) {
            (Some(column), _, _, _) => Ok(Self(column)),
            _ => Err(invalid()),
        }
    }

    /// Creates a column from its 1-based index.
    pub fn from_index(index: u32) -> Option<Self> {
        (index > 0).then_some(Self(index))
    }

    /// The 1-based column index.
    pub fn index(self) -> u32 {
        self.0
    }

    /// The cell in this column at a 1-based row.
    pub fn at(self, row: u32) -> CellRef {
        CellRef {
            row,
            column: self.0,
        }
    }
}

impl TryFrom<String> for ColumnRef {
    type Error = ExportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ColumnRef> for String {
    fn from(value: ColumnRef) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&string_from_column_index(&self.0))
    }
}

/// A single cell, 1-based in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellRef {
    /// Row number.
    pub row: u32,
    /// Column number.
    pub column: u32,
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&coordinate_from_index(&self.column, &self.row))
    }
}

/// Cell operations the export engine performs on a worksheet.
pub trait SheetCells {
    /// The cell's displayed text, or `None` if the cell does not exist.
    fn cell_text(&self, cell: CellRef) -> Option<String>;

    /// Removes the cell's value, keeping nothing behind.
    fn clear_cell(&mut self, cell: CellRef);

    /// Writes a number and its display format.
    fn write_number(&mut self, cell: CellRef, value: f64, format_code: &str) -> ExportResult<()>;

    /// Returns true if a note is attached to the cell.
    fn has_note(&self, cell: CellRef) -> bool;

    /// Removes the cell's note. Returns true if one was removed.
    fn remove_note(&mut self, cell: CellRef) -> bool;

    /// Attaches a note to the cell, replacing any existing one.
    fn set_note(&mut self, cell: CellRef, text: &str) -> ExportResult<()>;
}

/// A workbook the engine can pull a worksheet out of.
pub trait Workbook {
    /// The worksheet type.
    type Sheet: SheetCells;

    /// Looks up a worksheet by name.
    fn sheet_mut(&mut self, name: &str) -> Option<&mut Self::Sheet>;
}
