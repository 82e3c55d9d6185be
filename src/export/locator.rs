//! Date row lookup.

use crate::config::TemplateSettings;
use crate::error::{ExportError, ExportResult};
use crate::sheet::SheetCells;

/// Finds the row block for a date in the template's date column.
///
/// Scans the configured search range top to bottom and stops at the first
/// cell whose trimmed display text equals the trimmed target. Empty cells
/// never match.
///
/// # Returns
///
/// The zero-based base row, i.e. one less than the matched 1-based row.
/// Record `i` of the batch is written to 1-based row `base_row + i + 1`,
/// so the first record lands on the date row itself. Returns
/// `DateNotFound` if no cell matches.
///
/// # Example
///
/// ```
/// use srs_export::config::TemplateLayout;
/// use srs_export::export::locate_date_row;
/// use srs_export::sheet::{ColumnRef, MemorySheet};
///
/// let layout = TemplateLayout::standard().unwrap();
/// let mut sheet = MemorySheet::new();
/// sheet.set_text(ColumnRef::parse("A").unwrap().at(57), "15/01/2026");
///
/// assert_eq!(locate_date_row(&sheet, layout.settings(), "15/01/2026").unwrap(), 56);
/// ```
pub fn locate_date_row<S: SheetCells + ?Sized>(
    sheet: &S,
    settings: &TemplateSettings,
    target: &str,
) -> ExportResult<u32> {
    let target = target.trim();
    let column = settings.date_column;

    (settings.search_first_row..=settings.search_last_row)
        .find(|&row| {
            sheet.cell_text(column.at(row)).is_some_and(|text| {
                let text = text.trim();
                !text.is_empty() && text == target
            })
        })
        .map(|row| row - 1)
        .ok_or_else(|| ExportError::DateNotFound {
            date: target.to_string(),
        })
}
