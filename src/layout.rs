//! Row allocation for the output sheet.
//!
//! [`LayoutCursor`] owns the sheet being built and the index of the next
//! free row. Every write advances the cursor; it never moves back, so cells
//! are never rewritten. Blocks (text, tables) are followed by one empty
//! spacer row.

use crate::error::{Error, Result};
use crate::sheet::{CellStyle, Sheet};

/// Label of the aggregated numbers section.
pub const NUMBERS_SECTION_LABEL: &str = "=== Extracted Numbers ===";

/// Label of the text section of page `page` (1-based).
pub fn text_section_label(page: usize) -> String {
    format!("=== Page {} Text ===", page)
}

/// Label of table `table` (1-based) on page `page` (1-based).
pub fn table_section_label(page: usize, table: usize) -> String {
    format!("=== Page {} Table {} ===", page, table)
}

/// Append-only writer of rows into a [`Sheet`].
#[derive(Debug)]
pub struct LayoutCursor {
    sheet: Sheet,
    current_row: u32,
}

impl Default for LayoutCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCursor {
    /// Create a cursor at row 1 of an empty sheet.
    pub fn new() -> Self {
        Self {
            sheet: Sheet::new(),
            current_row: 1,
        }
    }

    /// Next row to be written.
    pub fn current_row(&self) -> u32 {
        self.current_row
    }

    /// The sheet built so far.
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Finish layout and take the sheet.
    pub fn into_sheet(self) -> Sheet {
        self.sheet
    }

    /// Write a styled label in column 1 and advance one row.
    pub fn write_section_header(&mut self, label: &str) -> Result<()> {
        self.sheet
            .set_cell(self.current_row, 1, label, Some(CellStyle::Header))?;
        self.current_row += 1;
        Ok(())
    }

    /// Write one text line in column 1 and advance one row.
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        self.sheet.set_cell(self.current_row, 1, line, None)?;
        self.current_row += 1;
        Ok(())
    }

    /// Leave the current row empty.
    pub fn write_spacer(&mut self) {
        self.current_row += 1;
    }

    /// Write each line on its own row, then a spacer row.
    pub fn write_text_block<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            self.write_line(line.as_ref())?;
        }
        self.write_spacer();
        Ok(())
    }

    /// Write `cells` across columns 1..=N of the current row and advance.
    pub fn write_row<S: AsRef<str>>(&mut self, cells: &[S]) -> Result<()> {
        for (i, value) in cells.iter().enumerate() {
            self.sheet
                .set_cell(self.current_row, i as u32 + 1, value.as_ref(), None)?;
        }
        self.current_row += 1;
        Ok(())
    }

    /// Write a header row, every data row, then a spacer row.
    ///
    /// Rows are written as given: shorter rows leave trailing columns empty
    /// and longer rows spill past the header width.
    pub fn write_table<S: AsRef<str>>(&mut self, header: &[S], rows: &[Vec<S>]) -> Result<()> {
        self.write_row(header)?;
        for row in rows {
            self.write_row(row)?;
        }
        self.write_spacer();
        Ok(())
    }

    /// Write the numbers section: a header, then `tokens` wrapped every
    /// `columns_per_row` cells.
    ///
    /// Token `i` lands on row `start + i / columns_per_row`, column
    /// `1 + i % columns_per_row`. Nothing is written for an empty list.
    pub fn write_numbers_block<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        columns_per_row: u32,
    ) -> Result<()> {
        if columns_per_row == 0 {
            return Err(Error::InvalidConfig(
                "numbers block needs at least one column".to_string(),
            ));
        }
        if tokens.is_empty() {
            return Ok(());
        }

        self.write_section_header(NUMBERS_SECTION_LABEL)?;

        let start = self.current_row;
        for (i, token) in tokens.iter().enumerate() {
            let i = i as u32;
            let row = start + i / columns_per_row;
            let col = 1 + i % columns_per_row;
            self.sheet
                .set_cell(row, col, token.as_ref(), Some(CellStyle::Number))?;
        }

        let used_rows = (tokens.len() as u32).div_ceil(columns_per_row);
        self.current_row = start + used_rows + 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(text_section_label(3), "=== Page 3 Text ===");
        assert_eq!(table_section_label(1, 2), "=== Page 1 Table 2 ===");
    }

    #[test]
    fn test_section_header_styled() {
        let mut cursor = LayoutCursor::new();
        cursor.write_section_header("Intro").unwrap();
        assert_eq!(cursor.current_row(), 2);
        let cell = cursor.sheet().get(1, 1).unwrap();
        assert_eq!(cell.value, "Intro");
        assert_eq!(cell.style, Some(CellStyle::Header));
    }

    #[test]
    fn test_text_block_adds_spacer() {
        let mut cursor = LayoutCursor::new();
        cursor.write_text_block(&["one", "two"]).unwrap();
        assert_eq!(cursor.current_row(), 4);
        assert_eq!(cursor.sheet().value(1, 1), Some("one"));
        assert_eq!(cursor.sheet().value(2, 1), Some("two"));
        assert_eq!(cursor.sheet().value(3, 1), None);
    }

    #[test]
    fn test_empty_text_block_is_spacer_only() {
        let mut cursor = LayoutCursor::new();
        cursor.write_text_block::<&str>(&[]).unwrap();
        assert_eq!(cursor.current_row(), 2);
        assert!(cursor.sheet().is_empty());
    }

    #[test]
    fn test_table_layout_sparse_and_wide() {
        let mut cursor = LayoutCursor::new();
        let header = vec!["A", "B", "C"];
        let rows = vec![vec!["1"], vec!["1", "2", "3", "4"]];
        cursor.write_table(&header, &rows).unwrap();

        let sheet = cursor.sheet();
        assert_eq!(sheet.row_values(1), vec!["A", "B", "C"]);
        assert_eq!(sheet.row_values(2), vec!["1"]);
        assert_eq!(sheet.value(2, 2), None);
        assert_eq!(sheet.row_values(3), vec!["1", "2", "3", "4"]);
        assert_eq!(cursor.current_row(), 5);
    }

    #[test]
    fn test_numbers_block_wraps() {
        let mut cursor = LayoutCursor::new();
        let tokens: Vec<String> = (1..=7).map(|n| n.to_string()).collect();
        cursor.write_numbers_block(&tokens, 5).unwrap();

        let sheet = cursor.sheet();
        assert_eq!(sheet.value(1, 1), Some(NUMBERS_SECTION_LABEL));
        assert_eq!(sheet.row_values(2), vec!["1", "2", "3", "4", "5"]);
        // Token index 5 starts the next row
        assert_eq!(sheet.value(3, 1), Some("6"));
        assert_eq!(sheet.value(3, 2), Some("7"));
        assert_eq!(sheet.get(3, 1).unwrap().style, Some(CellStyle::Number));
        assert_eq!(cursor.current_row(), 5);
    }

    #[test]
    fn test_numbers_block_exact_multiple() {
        let mut cursor = LayoutCursor::new();
        cursor.write_numbers_block(&["1", "2", "3", "4"], 2).unwrap();
        assert_eq!(cursor.sheet().row_values(3), vec!["3", "4"]);
        assert_eq!(cursor.current_row(), 5);
    }

    #[test]
    fn test_empty_numbers_block_writes_nothing() {
        let mut cursor = LayoutCursor::new();
        cursor.write_numbers_block::<&str>(&[], 5).unwrap();
        assert!(cursor.sheet().is_empty());
        assert_eq!(cursor.current_row(), 1);
    }

    #[test]
    fn test_numbers_block_zero_columns() {
        let mut cursor = LayoutCursor::new();
        assert!(cursor.write_numbers_block(&["1"], 0).is_err());
    }

    #[test]
    fn test_rows_never_decrease() {
        let mut cursor = LayoutCursor::new();
        let mut last = cursor.current_row();
        cursor.write_section_header("h").unwrap();
        assert!(cursor.current_row() > last);
        last = cursor.current_row();
        cursor.write_table(&["x"], &[vec!["y"]]).unwrap();
        assert!(cursor.current_row() > last);
        last = cursor.current_row();
        cursor.write_numbers_block(&["1"], 5).unwrap();
        assert!(cursor.current_row() > last);
    }
}
