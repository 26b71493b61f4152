//! Page content normalization.
//!
//! Turns the raw output of a [`DocumentSource`] into what the layout needs:
//! trimmed, non-blank text lines and string grids with no missing cells.
//! Nothing here looks for numbers.

use crate::error::Result;
use crate::source::{DocumentSource, RawTable};
use serde::Serialize;

/// Normalized content of one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    /// Page number (1-based)
    pub number: usize,
    /// Text lines, or `None` when the page has no text
    pub lines: Option<Vec<String>>,
    /// Table grids in extraction order
    pub tables: Vec<Vec<Vec<String>>>,
}

/// A table with a distinct header row and at least one data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// First grid row
    pub header: Vec<String>,
    /// Remaining grid rows
    pub rows: Vec<Vec<String>>,
}

/// Why a grid was not written as a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum SkipReason {
    /// The grid has no rows
    Empty,
    /// The grid has a header but no data rows
    HeaderOnly,
    /// The grid cannot be laid out as header + rows
    Malformed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Empty => write!(f, "table is empty"),
            SkipReason::HeaderOnly => write!(f, "table has no data rows"),
            SkipReason::Malformed(reason) => write!(f, "{}", reason),
        }
    }
}

impl Table {
    /// Split a grid into header and data rows.
    ///
    /// The two ways a data row can miss the header width are treated
    /// differently. A shorter row is accepted and later written sparse, its
    /// trailing columns left empty. A wider row would put cells under no
    /// header, so it makes the whole table malformed unless
    /// `allow_wide_rows` is set, in which case it is written past the
    /// header width.
    pub fn from_grid(
        mut grid: Vec<Vec<String>>,
        allow_wide_rows: bool,
    ) -> std::result::Result<Table, SkipReason> {
        match grid.len() {
            0 => return Err(SkipReason::Empty),
            1 => return Err(SkipReason::HeaderOnly),
            _ => {},
        }

        let rows = grid.split_off(1);
        let header = grid.remove(0);
        if header.is_empty() {
            return Err(SkipReason::Malformed("header row has no cells".to_string()));
        }

        if !allow_wide_rows {
            if let Some((i, row)) = rows
                .iter()
                .enumerate()
                .find(|(_, row)| row.len() > header.len())
            {
                return Err(SkipReason::Malformed(format!(
                    "data row {} has {} cells, header has {}",
                    i + 1,
                    row.len(),
                    header.len()
                )));
            }
        }

        Ok(Table { header, rows })
    }

    /// Number of columns, taken from the header.
    pub fn width(&self) -> usize {
        self.header.len()
    }
}

/// Split text into trimmed lines, dropping blank ones.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trim every cell and replace missing cells with empty strings.
pub fn normalize_grid(raw: RawTable) -> Vec<Vec<String>> {
    raw.into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| cell.map(|s| s.trim().to_string()).unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Read and normalize page `page_index` (0-based) of `source`.
pub fn extract_page<S: DocumentSource + ?Sized>(
    source: &mut S,
    page_index: usize,
) -> Result<PageContent> {
    let lines = source
        .extract_text(page_index)?
        .filter(|text| !text.is_empty())
        .map(|text| normalize_lines(&text));

    let tables = source
        .extract_tables(page_index)?
        .into_iter()
        .map(normalize_grid)
        .collect();

    Ok(PageContent {
        number: page_index + 1,
        lines,
        tables,
    })
}
