//! In-memory worksheet.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ExportError, ExportResult};

use super::{CellRef, SheetCells, Workbook};

/// A stored cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Text, as typed into the template.
    Text(String),
    /// A number written by the engine.
    Number(f64),
}

/// A stored cell.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryCell {
    /// The value.
    pub value: CellValue,
    /// The number format, if one was set.
    pub format_code: Option<String>,
}

/// A worksheet held in memory.
///
/// Cells can be marked read-only to make writes to them fail.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemorySheet {
    cells: BTreeMap<CellRef, MemoryCell>,
    notes: BTreeMap<CellRef, String>,
    read_only: BTreeSet<CellRef>,
}

impl MemorySheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores text in a cell.
    pub fn set_text(&mut self, cell: CellRef, text: impl Into<String>) {
        self.cells.insert(
            cell,
            MemoryCell {
                value: CellValue::Text(text.into()),
                format_code: None,
            },
        );
    }

    /// Attaches a note directly, bypassing read-only checks.
    pub fn put_note(&mut self, cell: CellRef, text: impl Into<String>) {
        self.notes.insert(cell, text.into());
    }

    /// Makes writes to this cell fail.
    pub fn mark_read_only(&mut self, cell: CellRef) {
        self.read_only.insert(cell);
    }

    /// Returns the stored cell.
    pub fn cell(&self, cell: CellRef) -> Option<&MemoryCell> {
        self.cells.get(&cell)
    }

    /// Returns the cell's number, if it holds one.
    pub fn number(&self, cell: CellRef) -> Option<f64> {
        match self.cells.get(&cell)?.value {
            CellValue::Number(n) => Some(n),
            CellValue::Text(_) => None,
        }
    }

    /// Returns the cell's number format.
    pub fn format_code(&self, cell: CellRef) -> Option<&str> {
        self.cells.get(&cell)?.format_code.as_deref()
    }

    /// Returns the note attached to the cell.
    pub fn note(&self, cell: CellRef) -> Option<&str> {
        self.notes.get(&cell).map(String::as_str)
    }

    /// Number of cells holding a value.
    pub fn populated_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of attached notes.
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    fn ensure_writable(&self, cell: CellRef) -> ExportResult<()> {
        if self.read_only.contains(&cell) {
            return Err(ExportError::CellWriteFailed {
                cell: cell.to_string(),
                message: "cell is read-only".to_string(),
            });
        }
        Ok(())
    }
}

impl SheetCells for MemorySheet {
    fn cell_text(&self, cell: CellRef) -> Option<String> {
        self.cells.get(&cell).map(|c| match &c.value {
            CellValue::Text(text) => text.clone(),
            CellValue::Number(n) => n.to_string(),
        })
    }

    fn clear_cell(&mut self, cell: CellRef) {
        self.cells.remove(&cell);
    }

    fn write_number(&mut self, cell: CellRef, value: f64, format_code: &str) -> ExportResult<()> {
        self.ensure_writable(cell)?;
        if !value.is_finite() {
            return Err(ExportError::CellWriteFailed {
                cell: cell.to_string(),
                message: format!("{} is not a finite number", value),
            });
        }
        self.cells.insert(
            cell,
            MemoryCell {
                value: CellValue::Number(value),
                format_code: Some(format_code.to_string()),
            },
        );
        Ok(())
    }

    fn has_note(&self, cell: CellRef) -> bool {
        self.notes.contains_key(&cell)
    }

    fn remove_note(&mut self, cell: CellRef) -> bool {
        self.notes.remove(&cell).is_some()
    }

    fn set_note(&mut self, cell: CellRef, text: &str) -> ExportResult<()> {
        self.ensure_writable(cell)?;
        self.notes.insert(cell, text.to_string());
        Ok(())
    }
}

/// A set of named in-memory worksheets.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, MemorySheet>,
}

impl MemoryWorkbook {
    /// Creates an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a worksheet.
    pub fn with_sheet(mut self, name: impl Into<String>, sheet: MemorySheet) -> Self {
        self.sheets.insert(name.into(), sheet);
        self
    }

    /// Looks up a worksheet by name.
    pub fn sheet(&self, name: &str) -> Option<&MemorySheet> {
        self.sheets.get(name)
    }
}

impl Workbook for MemoryWorkbook {
    type Sheet = MemorySheet;

    fn sheet_mut(&mut self, name: &str) -> Option<&mut MemorySheet> {
        self.sheets.get_mut(name)
    }
}
