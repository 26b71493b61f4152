//! PDF to XLSX conversion.
//!
//! [`Converter`] walks a document page by page and lays everything out in a
//! single sheet:
//!
//! - each page's text, under a `=== Page N Text ===` header
//! - each page's tables with at least one data row, under a
//!   `=== Page N Table T ===` header
//! - every numeric token found in text lines and table data cells, in
//!   document order, under `=== Extracted Numbers ===`
//!
//! A table that cannot be laid out is skipped and recorded in the
//! [`ConversionReport`]; the rest of the document is still converted. Any
//! other failure aborts the conversion.
//!
//! # Example
//!
//! ```ignore
//! use pdf2xlsx::{ConversionConfig, Converter};
//!
//! let converter = Converter::new(ConversionConfig::default());
//! let outcome = converter.convert_file("report.pdf", "report.xlsx");
//! println!("{}", outcome.message);
//! ```

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::extract::{extract_page, PageContent, SkipReason, Table};
use crate::layout::{table_section_label, text_section_label, LayoutCursor};
use crate::numbers::extract_numbers;
use crate::sheet::Sheet;
use crate::source::{DocumentSource, PdfSource};
use crate::xlsx::XlsxWriter;
use serde::Serialize;
use std::path::Path;

/// What happened to one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TableStatus {
    /// Written to the sheet
    Written {
        /// Data rows written (header excluded)
        rows: usize,
        /// Numeric tokens found in data cells
        tokens: usize,
    },
    /// Left out of the sheet
    Skipped {
        /// Why the table was left out
        reason: SkipReason,
    },
}

/// Outcome of one table of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableOutcome {
    /// Page number (1-based)
    pub page: usize,
    /// Table number within the page (1-based)
    pub index: usize,
    /// Written or skipped
    #[serde(flatten)]
    pub status: TableStatus,
}

impl TableOutcome {
    /// Whether the table made it into the sheet.
    pub fn is_written(&self) -> bool {
        matches!(self.status, TableStatus::Written { .. })
    }
}

/// Summary of a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    /// Pages processed
    pub pages: usize,
    /// Text lines written
    pub text_lines: usize,
    /// Every table, written or skipped, in document order
    pub tables: Vec<TableOutcome>,
    /// Every numeric token, in document order
    pub numbers: Vec<String>,
}

impl ConversionReport {
    /// Number of numeric tokens found.
    pub fn number_count(&self) -> usize {
        self.numbers.len()
    }

    /// Tables that were written.
    pub fn written_tables(&self) -> impl Iterator<Item = &TableOutcome> {
        self.tables.iter().filter(|t| t.is_written())
    }

    /// Tables that were skipped.
    pub fn skipped_tables(&self) -> impl Iterator<Item = &TableOutcome> {
        self.tables.iter().filter(|t| !t.is_written())
    }
}

/// A laid-out sheet and its report.
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The filled sheet
    pub sheet: Sheet,
    /// What went into it
    pub report: ConversionReport,
}

/// Final result of a file conversion, for callers and for printing.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionOutcome {
    /// Whether the workbook was written
    pub success: bool,
    /// Human readable summary or error
    pub message: String,
    /// Conversion report, present on success
    pub report: Option<ConversionReport>,
}

/// Drives a document through extraction, layout and output.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// Create a converter.
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Lay out every page of `source` in a new sheet.
    pub fn convert_document<S: DocumentSource + ?Sized>(&self, source: &mut S) -> Result<Conversion> {
        self.config.validate()?;

        let mut cursor = LayoutCursor::new();
        let mut report = ConversionReport::default();

        let page_count = source.page_count()?;
        log::debug!("Converting {} page(s)", page_count);

        for page_index in 0..page_count {
            let page = extract_page(source, page_index)?;
            self.layout_page(&mut cursor, page, &mut report)?;
            report.pages += 1;
        }

        cursor.write_numbers_block(&report.numbers, self.config.numbers_per_row)?;

        log::debug!(
            "Laid out {} rows: {} text lines, {} of {} tables, {} numbers",
            cursor.current_row() - 1,
            report.text_lines,
            report.written_tables().count(),
            report.tables.len(),
            report.numbers.len()
        );

        Ok(Conversion {
            sheet: cursor.into_sheet(),
            report,
        })
    }

    /// Convert `source` and save the workbook to `output`.
    pub fn convert_to_file<S: DocumentSource + ?Sized>(
        &self,
        source: &mut S,
        output: impl AsRef<Path>,
    ) -> Result<ConversionReport> {
        let conversion = self.convert_document(source)?;
        XlsxWriter::new(&self.config).save(&conversion.sheet, output)?;
        Ok(conversion.report)
    }

    /// Convert the PDF at `input` into the workbook at `output`.
    ///
    /// Never fails: errors are logged and reported in the outcome. The PDF
    /// is closed before this returns.
    pub fn convert_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> ConversionOutcome {
        let output = output.as_ref();
        let result = PdfSource::open(input.as_ref(), &self.config)
            .and_then(|mut source| self.convert_to_file(&mut source, output));
        Self::outcome(result, output)
    }

    /// Like [`Converter::convert_file`] for an already opened source.
    pub fn convert_source<S: DocumentSource + ?Sized>(
        &self,
        source: &mut S,
        output: impl AsRef<Path>,
    ) -> ConversionOutcome {
        let output = output.as_ref();
        Self::outcome(self.convert_to_file(source, output), output)
    }

    fn outcome(result: Result<ConversionReport>, output: &Path) -> ConversionOutcome {
        match result {
            Ok(report) => {
                let message = format!(
                    "Successfully extracted {} numbers to {}",
                    report.number_count(),
                    output.display()
                );
                log::info!("{}", message);
                ConversionOutcome {
                    success: true,
                    message,
                    report: Some(report),
                }
            },
            Err(e) => {
                let message = format!("Error: {}", e);
                log::error!("{}", message);
                ConversionOutcome {
                    success: false,
                    message,
                    report: None,
                }
            },
        }
    }

    fn layout_page(
        &self,
        cursor: &mut LayoutCursor,
        page: PageContent,
        report: &mut ConversionReport,
    ) -> Result<()> {
        log::debug!(
            "Page {}: {} text line(s), {} table(s)",
            page.number,
            page.lines.as_ref().map_or(0, Vec::len),
            page.tables.len()
        );

        if let Some(lines) = &page.lines {
            cursor.write_section_header(&text_section_label(page.number))?;
            cursor.write_text_block(lines)?;
            for line in lines {
                report.numbers.extend(extract_numbers(line));
            }
            report.text_lines += lines.len();
        }

        for (i, grid) in page.tables.into_iter().enumerate() {
            let outcome = self.layout_table(cursor, page.number, i + 1, grid, &mut report.numbers);
            report.tables.push(outcome);
        }

        Ok(())
    }

    /// Write one table, appending tokens from its data cells to `numbers`.
    ///
    /// Failures stay local to the table.
    fn layout_table(
        &self,
        cursor: &mut LayoutCursor,
        page: usize,
        index: usize,
        grid: Vec<Vec<String>>,
        numbers: &mut Vec<String>,
    ) -> TableOutcome {
        let skipped = |reason: SkipReason| TableOutcome {
            page,
            index,
            status: TableStatus::Skipped { reason },
        };

        let table = match Table::from_grid(grid, self.config.allow_wide_rows) {
            Ok(table) => table,
            Err(SkipReason::Malformed(reason)) => {
                let err = Error::MalformedTable {
                    page,
                    table: index,
                    reason: reason.clone(),
                };
                log::warn!("Skipping table: {}", err);
                return skipped(SkipReason::Malformed(reason));
            },
            Err(reason) => {
                log::debug!("Skipping table {} on page {}: {}", index, page, reason);
                return skipped(reason);
            },
        };

        let written = cursor
            .write_section_header(&table_section_label(page, index))
            .and_then(|_| cursor.write_table(&table.header, &table.rows));
        if let Err(e) = written {
            log::warn!("Error processing table {} on page {}: {}", index, page, e);
            return skipped(SkipReason::Malformed(e.to_string()));
        }

        let before = numbers.len();
        for cell in table.rows.iter().flatten() {
            numbers.extend(extract_numbers(cell));
        }

        TableOutcome {
            page,
            index,
            status: TableStatus::Written {
                rows: table.rows.len(),
                tokens: numbers.len() - before,
            },
        }
    }
}

/// Convert `input` to `output` with the default configuration.
pub fn convert_pdf_to_xlsx(input: impl AsRef<Path>, output: impl AsRef<Path>) -> ConversionOutcome {
    Converter::default().convert_file(input, output)
}
