//! # pdf2xlsx
//!
//! Convert a PDF into a single spreadsheet sheet: page text, detected tables
//! and every number found in them, each in its own styled section.
//!
//! ## Pipeline
//!
//! - **Source**: [`source::PdfSource`] reads page text and positioned spans
//!   with `pdf_oxide`; table grids come from alignment analysis in [`tables`]
//! - **Extraction**: [`extract`] trims lines and fills missing table cells
//! - **Numbers**: [`numbers`] recognizes integers, decimals, currency amounts
//!   and percentages, verbatim (`$1,234.56`, `-15%`)
//! - **Layout**: [`layout::LayoutCursor`] places every block on its own rows,
//!   top to bottom, with the collected numbers last
//! - **Output**: [`xlsx::XlsxWriter`] writes an `.xlsx` workbook
//!
//! ## Quick Start
//!
//! ```ignore
//! use pdf2xlsx::{ConversionConfig, Converter};
//!
//! let converter = Converter::new(ConversionConfig::default());
//! let outcome = converter.convert_file("statement.pdf", "statement.xlsx");
//! if outcome.success {
//!     println!("{}", outcome.message);
//! }
//! ```
//!
//! Content that is already in memory goes through a [`source::MemorySource`]:
//!
//! ```
//! use pdf2xlsx::source::{raw_table, MemorySource};
//! use pdf2xlsx::Converter;
//!
//! let mut source = MemorySource::new().with_page(
//!     Some("Revenue 42\nGrowth 3.5%"),
//!     vec![raw_table([["Name", "Qty"], ["A", "10"]])],
//! );
//! let conversion = Converter::default().convert_document(&mut source).unwrap();
//! assert_eq!(conversion.report.numbers, vec!["42", "3.5%", "10"]);
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Number recognition
pub mod numbers;

// Input: document sources and page normalization
pub mod extract;
pub mod source;
pub mod tables;

// Output: sheet model, row layout, XLSX package
pub mod layout;
pub mod sheet;
pub mod xlsx;

// Orchestration
pub mod converter;

// Re-exports
pub use config::ConversionConfig;
pub use converter::{
    convert_pdf_to_xlsx, Conversion, ConversionOutcome, ConversionReport, Converter,
    TableOutcome, TableStatus,
};
pub use error::{Error, Result};
pub use extract::SkipReason;
pub use numbers::extract_numbers;
pub use sheet::{Cell, CellStyle, Sheet};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(VERSION.starts_with("0."));
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pdf2xlsx");
    }
}
