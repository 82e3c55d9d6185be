//! Row block clearing functionality.
//!
//! Before a date's records are written, the whole row block for that date
//! is blanked so no value or note from a previous export survives.

use std::ops::Range;

use crate::config::{SheetLayout, TemplateSettings};
use crate::sheet::{ColumnRef, SheetCells};

/// Counts from clearing one row block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClearReport {
    /// Clear operations performed, whether or not the cell held a value.
    pub cells_cleared: usize,
    /// Notes actually removed.
    pub comments_cleared: usize,
}

/// Blanks the row block of one sheet type.
///
/// The block spans `max_rows` rows starting at 1-based row `base_row + 1`.
#[derive(Debug, Clone, Copy)]
pub struct BlockCleaner<'a> {
    settings: &'a TemplateSettings,
    layout: &'a SheetLayout,
}

impl<'a> BlockCleaner<'a> {
    /// Creates a cleaner for a sheet type's layout.
    pub fn new(settings: &'a TemplateSettings, layout: &'a SheetLayout) -> Self {
        Self { settings, layout }
    }

    /// Clears values, then notes.
    pub fn clear<S: SheetCells + ?Sized>(&self, sheet: &mut S, base_row: u32) -> ClearReport {
        let cells_cleared = self.clear_values(sheet, base_row);
        let comments_cleared = self.clear_notes(sheet, base_row);
        ClearReport {
            cells_cleared,
            comments_cleared,
        }
    }

    /// Blanks every clear column in every row of the block, and the date
    /// cell of every row after the first. The matched date row keeps its
    /// date.
    ///
    /// Returns the number of clear operations, counted whether or not the
    /// cell held a value.
    pub fn clear_values<S: SheetCells + ?Sized>(&self, sheet: &mut S, base_row: u32) -> usize {
        let mut cleared = 0;
        for row in self.rows(base_row) {
            if row > base_row + 1 {
                sheet.clear_cell(self.settings.date_column.at(row));
                cleared += 1;
            }
            for column in &self.layout.clear_columns {
                sheet.clear_cell(column.at(row));
                cleared += 1;
            }
        }
        cleared
    }

    /// Removes notes from the first `comment_sweep_columns` columns of
    /// every row in the block.
    ///
    /// Returns the number of notes removed.
    pub fn clear_notes<S: SheetCells + ?Sized>(&self, sheet: &mut S, base_row: u32) -> usize {
        let mut removed = 0;
        let sweep = 1..=self.settings.comment_sweep_columns;
        for row in self.rows(base_row) {
            for column in sweep.clone().filter_map(ColumnRef::from_index) {
                if sheet.remove_note(column.at(row)) {
                    removed += 1;
                }
            }
        }
        removed
    }

    fn rows(&self, base_row: u32) -> Range<u32> {
        let first = base_row + 1;
        let height = u32::try_from(self.layout.max_rows).unwrap_or(u32::MAX);
        first..first.saturating_add(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TemplateLayout;
    use crate::models::SheetType;
    use crate::sheet::{MemorySheet, SheetCells};

    fn col(letters: &str) -> ColumnRef {
        ColumnRef::parse(letters).unwrap()
    }

    fn sheet_with_block(rows: std::ops::RangeInclusive<u32>) -> MemorySheet {
        let mut sheet = MemorySheet::new();
        for row in rows {
            for letters in ["A", "B", "C", "F", "K", "P", "Q", "AG", "AH", "AX", "AY"] {
                sheet.set_text(col(letters).at(row), "old");
            }
        }
        sheet
    }

    #[test]
    fn test_type_2_clears_59_cells() {
        let layout = TemplateLayout::standard().unwrap();
        let sheet_layout = layout.sheet_layout(SheetType::Type2).unwrap();
        let cleaner = BlockCleaner::new(layout.settings(), sheet_layout);
        let mut sheet = sheet_with_block(11..=12);

        let cleared = cleaner.clear_values(&mut sheet, 10);

        assert_eq!(cleared, 2 * 29 + 1);
        for row in 11..=12 {
            for letters in ["C", "F", "K", "Q", "AG"] {
                assert_eq!(sheet.cell_text(col(letters).at(row)), None, "{}{}", letters, row);
            }
            // Outside the clear set.
            assert!(sheet.cell_text(col("B").at(row)).is_some());
            assert!(sheet.cell_text(col("P").at(row)).is_some());
            assert!(sheet.cell_text(col("AH").at(row)).is_some());
        }
        assert!(sheet.cell_text(col("A").at(11)).is_some());
        assert_eq!(sheet.cell_text(col("A").at(12)), None);
    }

    #[test]
    fn test_type_3_clears_three_rows() {
        let layout = TemplateLayout::standard().unwrap();
        let sheet_layout = layout.sheet_layout(SheetType::Type3).unwrap();
        let cleaner = BlockCleaner::new(layout.settings(), sheet_layout);
        let mut sheet = sheet_with_block(20..=23);

        assert_eq!(cleaner.clear_values(&mut sheet, 19), 3 * 29 + 2);

        for row in 20..=22 {
            for letters in ["C", "F", "P", "AH", "AX"] {
                assert_eq!(sheet.cell_text(col(letters).at(row)), None);
            }
            assert!(sheet.cell_text(col("K").at(row)).is_some());
            assert!(sheet.cell_text(col("Q").at(row)).is_some());
            assert!(sheet.cell_text(col("AY").at(row)).is_some());
        }
        assert!(sheet.cell_text(col("A").at(20)).is_some());
        assert_eq!(sheet.cell_text(col("A").at(22)), None);
        // Row after the block is untouched.
        assert!(sheet.cell_text(col("C").at(23)).is_some());
        assert!(sheet.cell_text(col("A").at(23)).is_some());
    }

    #[test]
    fn test_clearing_empty_cells_still_counts() {
        let layout = TemplateLayout::standard().unwrap();
        let sheet_layout = layout.sheet_layout(SheetType::Type2).unwrap();
        let cleaner = BlockCleaner::new(layout.settings(), sheet_layout);
        let mut sheet = MemorySheet::new();

        assert_eq!(cleaner.clear_values(&mut sheet, 0), 59);
    }

    #[test]
    fn test_notes_swept_across_block_only() {
        let layout = TemplateLayout::standard().unwrap();
        let sheet_layout = layout.sheet_layout(SheetType::Type2).unwrap();
        let cleaner = BlockCleaner::new(layout.settings(), sheet_layout);
        let mut sheet = MemorySheet::new();
        sheet.put_note(col("E").at(11), "lunch");
        sheet.put_note(col("GR").at(12), "far right");
        sheet.put_note(col("GS").at(12), "outside sweep");
        sheet.put_note(col("E").at(13), "next block");

        let report = cleaner.clear(&mut sheet, 10);

        assert_eq!(report.comments_cleared, 2);
        assert_eq!(report.cells_cleared, 59);
        assert_eq!(sheet.note_count(), 2);
        assert!(sheet.has_note(col("GS").at(12)));
        assert!(sheet.has_note(col("E").at(13)));
    }
}
