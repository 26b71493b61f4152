//! Error types for PDF to XLSX conversion.
//!
//! This module defines all error types that can occur while reading a PDF,
//! laying out its content and writing the workbook.

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during conversion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The PDF could not be opened or parsed
    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_oxide::Error),

    /// ZIP container error while writing the workbook
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML serialization error while writing a workbook part
    #[error("XML error: {0}")]
    Xml(String),

    /// Page index outside the document
    #[error("Page {index} out of range (document has {count} pages)")]
    PageOutOfRange {
        /// Requested page index (0-based)
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// A table grid that cannot be laid out
    #[error("Malformed table {table} on page {page}: {reason}")]
    MalformedTable {
        /// Page number (1-based)
        page: usize,
        /// Table number within the page (1-based)
        table: usize,
        /// What is wrong with the grid
        reason: String,
    },

    /// Cell coordinates are 1-based
    #[error("Invalid cell coordinate ({row}, {col}): rows and columns start at 1")]
    InvalidCell {
        /// Row index
        row: u32,
        /// Column index
        col: u32,
    },

    /// Cells are written once and never overwritten
    #[error("Cell ({row}, {col}) has already been written")]
    CellOverwrite {
        /// Row index
        row: u32,
        /// Column index
        col: u32,
    },

    /// Rejected configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_table_error() {
        let err = Error::MalformedTable {
            page: 2,
            table: 3,
            reason: "row 1 has 4 cells, header has 2".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("table 3"));
        assert!(msg.contains("page 2"));
        assert!(msg.contains("header has 2"));
    }

    #[test]
    fn test_cell_overwrite_error() {
        let err = Error::CellOverwrite { row: 4, col: 1 };
        assert_eq!(format!("{}", err), "Cell (4, 1) has already been written");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.pdf");
        let err: Error = io.into();
        assert!(format!("{}", err).contains("missing.pdf"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
