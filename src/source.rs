//! Document sources.
//!
//! A [`DocumentSource`] hands out the raw content of each page: its text, if
//! any, and its tables as grids of optional strings. [`PdfSource`] reads a
//! PDF file through `pdf_oxide`; [`MemorySource`] serves pages that are
//! already in memory.

use crate::config::ConversionConfig;
use crate::error::{Error, Result};
use crate::tables::{detect_grids, TextFragment};
use pdf_oxide::PdfDocument;
use std::path::Path;

pub use crate::tables::RawTable;

/// Raw page content provider.
///
/// Pages are addressed by 0-based index in physical order.
pub trait DocumentSource {
    /// Number of pages in the document.
    fn page_count(&mut self) -> Result<usize>;

    /// Text of a page, or `None` when the page has no text.
    fn extract_text(&mut self, page_index: usize) -> Result<Option<String>>;

    /// Tables of a page in extraction order.
    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<RawTable>>;
}

/// A PDF document read with `pdf_oxide`.
///
/// The file is held open for the lifetime of the value and closed on drop.
pub struct PdfSource {
    doc: PdfDocument,
    detect_tables: bool,
    row_tolerance: f32,
    column_tolerance: f32,
}

impl PdfSource {
    /// Open the PDF at `path`.
    pub fn open(path: impl AsRef<Path>, config: &ConversionConfig) -> Result<Self> {
        let doc = PdfDocument::open(path.as_ref())?;
        Ok(Self {
            doc,
            detect_tables: config.detect_tables,
            row_tolerance: config.row_tolerance,
            column_tolerance: config.column_tolerance,
        })
    }

    fn check_page(&mut self, index: usize) -> Result<()> {
        let count = self.doc.page_count()?;
        if index >= count {
            return Err(Error::PageOutOfRange { index, count });
        }
        Ok(())
    }
}

impl DocumentSource for PdfSource {
    fn page_count(&mut self) -> Result<usize> {
        Ok(self.doc.page_count()?)
    }

    fn extract_text(&mut self, page_index: usize) -> Result<Option<String>> {
        self.check_page(page_index)?;
        let text = self.doc.extract_text(page_index)?;
        Ok(if text.is_empty() { None } else { Some(text) })
    }

    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<RawTable>> {
        self.check_page(page_index)?;
        if !self.detect_tables {
            return Ok(Vec::new());
        }

        let fragments: Vec<TextFragment> = self
            .doc
            .extract_spans(page_index)?
            .into_iter()
            .map(|span| TextFragment::new(span.text, span.bbox.x, span.bbox.y, span.bbox.width))
            .collect();

        Ok(detect_grids(
            &fragments,
            self.row_tolerance,
            self.column_tolerance,
        ))
    }
}

/// Content of one in-memory page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryPage {
    /// Page text, if any
    pub text: Option<String>,
    /// Page tables in extraction order
    pub tables: Vec<RawTable>,
}

/// A document whose pages are already in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySource {
    pages: Vec<MemoryPage>,
}

impl MemorySource {
    /// Create a document with no pages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page.
    pub fn with_page(mut self, text: Option<&str>, tables: Vec<RawTable>) -> Self {
        self.pages.push(MemoryPage {
            text: text.map(str::to_string),
            tables,
        });
        self
    }

    /// Append a page holding only text.
    pub fn with_text_page(self, text: &str) -> Self {
        self.with_page(Some(text), Vec::new())
    }

    fn page(&self, index: usize) -> Result<&MemoryPage> {
        self.pages.get(index).ok_or(Error::PageOutOfRange {
            index,
            count: self.pages.len(),
        })
    }
}

impl DocumentSource for MemorySource {
    fn page_count(&mut self) -> Result<usize> {
        Ok(self.pages.len())
    }

    fn extract_text(&mut self, page_index: usize) -> Result<Option<String>> {
        Ok(self.page(page_index)?.text.clone())
    }

    fn extract_tables(&mut self, page_index: usize) -> Result<Vec<RawTable>> {
        Ok(self.page(page_index)?.tables.clone())
    }
}

/// Build a raw table from string rows, treating every cell as present.
pub fn raw_table<R, C>(rows: R) -> RawTable
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(|cell| Some(cell.into())).collect())
        .collect()
}
