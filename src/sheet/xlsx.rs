//! `.xlsx` workbooks via `umya_spreadsheet`.

use std::io::Cursor;

use umya_spreadsheet::{Comment, Spreadsheet, Worksheet};

use crate::error::{ExportError, ExportResult};

use super::{CellRef, SheetCells, Workbook};

/// Parses workbook bytes.
pub fn read_workbook(bytes: &[u8]) -> ExportResult<Spreadsheet> {
    umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true).map_err(|e| {
        ExportError::UnreadableWorkbook {
            message: format!("{:?}", e),
        }
    })
}

/// Encodes a workbook back to bytes.
pub fn write_workbook(book: &Spreadsheet) -> ExportResult<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut buffer).map_err(|e| {
        ExportError::EncodeFailed {
            message: format!("{:?}", e),
        }
    })?;
    Ok(buffer.into_inner())
}

impl Workbook for Spreadsheet {
    type Sheet = Worksheet;

    fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.get_sheet_by_name_mut(name)
    }
}

impl SheetCells for Worksheet {
    fn cell_text(&self, cell: CellRef) -> Option<String> {
        self.get_cell((cell.column, cell.row))
            .map(|c| c.get_formatted_value())
    }

    fn clear_cell(&mut self, cell: CellRef) {
        if self.get_cell((cell.column, cell.row)).is_some() {
            self.get_cell_mut((cell.column, cell.row)).set_blank();
        }
    }

    fn write_number(&mut self, cell: CellRef, value: f64, format_code: &str) -> ExportResult<()> {
        if !value.is_finite() {
            return Err(ExportError::CellWriteFailed {
                cell: cell.to_string(),
                message: format!("{} is not a finite number", value),
            });
        }
        let target = self.get_cell_mut((cell.column, cell.row));
        target.set_value_number(value);
        target
            .get_style_mut()
            .get_number_format_mut()
            .set_format_code(format_code);
        Ok(())
    }

    fn has_note(&self, cell: CellRef) -> bool {
        self.get_comments().iter().any(|c| note_is_at(c, cell))
    }

    fn remove_note(&mut self, cell: CellRef) -> bool {
        let before = self.get_comments().len();
        self.get_comments_mut().retain(|c| !note_is_at(c, cell));
        self.get_comments().len() != before
    }

    fn set_note(&mut self, cell: CellRef, text: &str) -> ExportResult<()> {
        self.remove_note(cell);
        let mut comment = Comment::default();
        comment.new_comment((cell.column, cell.row));
        comment.set_text_string(text);
        self.add_comments(comment);
        Ok(())
    }
}

fn note_is_at(comment: &Comment, cell: CellRef) -> bool {
    let coordinate = comment.get_coordinate();
    coordinate.get_col_num().to_owned() == cell.column
        && coordinate.get_row_num().to_owned() == cell.row
}
