//! Configuration for PDF to XLSX conversion.

use crate::error::{Error, Result};

/// Characters Excel refuses in worksheet names.
const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Conversion configuration.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Tokens per row in the aggregated numbers block.
    pub numbers_per_row: u32,

    /// Title of the single output worksheet.
    pub sheet_name: String,

    /// RGB hex color of section header labels.
    pub header_color: String,

    /// RGB hex color of cells in the numbers block.
    pub number_color: String,

    /// Write data rows wider than the header instead of skipping the table.
    pub allow_wide_rows: bool,

    /// Run geometric table detection on PDF pages.
    pub detect_tables: bool,

    /// Vertical tolerance (points) for spans sharing a table row.
    pub row_tolerance: f32,

    /// Horizontal tolerance (points) for spans sharing a table column.
    pub column_tolerance: f32,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            numbers_per_row: 5,
            sheet_name: "Extracted Data".to_string(),
            header_color: "FF0000".to_string(),
            number_color: "0000FF".to_string(),
            allow_wide_rows: false,
            detect_tables: true,
            row_tolerance: 3.0,
            column_tolerance: 5.0,
        }
    }

    /// Set the number of tokens per row in the numbers block.
    pub fn with_numbers_per_row(mut self, columns: u32) -> Self {
        self.numbers_per_row = columns;
        self
    }

    /// Set the worksheet title.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Set the section header color (`RRGGBB`).
    pub fn with_header_color(mut self, color: impl Into<String>) -> Self {
        self.header_color = color.into();
        self
    }

    /// Set the numbers block color (`RRGGBB`).
    pub fn with_number_color(mut self, color: impl Into<String>) -> Self {
        self.number_color = color.into();
        self
    }

    /// Keep tables whose data rows are wider than their header.
    pub fn with_allow_wide_rows(mut self, allow: bool) -> Self {
        self.allow_wide_rows = allow;
        self
    }

    /// Enable or disable table detection.
    pub fn with_detect_tables(mut self, enable: bool) -> Self {
        self.detect_tables = enable;
        self
    }

    /// Set row and column tolerances for table detection.
    pub fn with_tolerances(mut self, row: f32, column: f32) -> Self {
        self.row_tolerance = row;
        self.column_tolerance = column;
        self
    }

    /// Check that every value can be used to build a workbook.
    pub fn validate(&self) -> Result<()> {
        if self.numbers_per_row == 0 {
            return Err(Error::InvalidConfig(
                "numbers_per_row must be at least 1".to_string(),
            ));
        }

        let name_len = self.sheet_name.chars().count();
        if name_len == 0 || name_len > 31 {
            return Err(Error::InvalidConfig(format!(
                "sheet name must be 1-31 characters, got {}",
                name_len
            )));
        }
        if let Some(c) = self
            .sheet_name
            .chars()
            .find(|c| FORBIDDEN_SHEET_CHARS.contains(c))
        {
            return Err(Error::InvalidConfig(format!(
                "sheet name contains forbidden character '{}'",
                c
            )));
        }

        for (what, color) in [("header", &self.header_color), ("number", &self.number_color)] {
            if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(Error::InvalidConfig(format!(
                    "{} color must be 6 hex digits, got '{}'",
                    what, color
                )));
            }
        }

        if !(self.row_tolerance >= 0.0 && self.column_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(
                "table tolerances must be non-negative".to_string(),
            ));
        }

        Ok(())
    }
}
