//! In-memory worksheet model.
//!
//! A [`Sheet`] is a sparse mapping from 1-based `(row, column)` coordinates
//! to string cells. Only written cells exist, and a cell is written at most
//! once.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Visual style tag of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStyle {
    /// Section header: bold, header color
    Header,
    /// Aggregated number: number color
    Number,
}

/// A single written cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// Cell text
    pub value: String,
    /// Optional style tag
    pub style: Option<CellStyle>,
}

/// A single worksheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    // Ordered by (row, col) so iteration is row-major
    cells: BTreeMap<(u32, u32), Cell>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` at `(row, col)`.
    ///
    /// Fails if either index is zero or the cell already holds a value.
    pub fn set_cell(
        &mut self,
        row: u32,
        col: u32,
        value: impl Into<String>,
        style: Option<CellStyle>,
    ) -> Result<()> {
        if row == 0 || col == 0 {
            return Err(Error::InvalidCell { row, col });
        }
        if self.cells.contains_key(&(row, col)) {
            return Err(Error::CellOverwrite { row, col });
        }
        self.cells.insert(
            (row, col),
            Cell {
                value: value.into(),
                style,
            },
        );
        Ok(())
    }

    /// Get the cell at `(row, col)`, if written.
    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Get the text at `(row, col)`, if written.
    pub fn value(&self, row: u32, col: u32) -> Option<&str> {
        self.get(row, col).map(|c| c.value.as_str())
    }

    /// Values of one row from column 1 up to its last written column.
    ///
    /// Unwritten cells in between come back as empty strings.
    pub fn row_values(&self, row: u32) -> Vec<String> {
        let cells: Vec<(u32, &Cell)> = self
            .cells
            .range((row, 1)..=(row, u32::MAX))
            .map(|(&(_, col), cell)| (col, cell))
            .collect();

        let width = cells.last().map(|&(col, _)| col).unwrap_or(0) as usize;
        let mut values = vec![String::new(); width];
        for (col, cell) in cells {
            values[col as usize - 1] = cell.value.clone();
        }
        values
    }

    /// Iterate over written cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, &Cell)> {
        self.cells.iter().map(|(&(row, col), cell)| (row, col, cell))
    }

    /// Highest written row, or 0 for an empty sheet.
    pub fn max_row(&self) -> u32 {
        self.cells.keys().next_back().map(|&(row, _)| row).unwrap_or(0)
    }

    /// Highest written column, or 0 for an empty sheet.
    pub fn max_col(&self) -> u32 {
        self.cells.keys().map(|&(_, col)| col).max().unwrap_or(0)
    }

    /// Number of written cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no cell has been written.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
