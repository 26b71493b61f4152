//! Table grid detection from positioned text.
//!
//! Finds regions where text fragments line up in rows and columns and turns
//! them into row-major grids of cell strings. This is alignment analysis
//! only: no ruling lines are read.
//!
//! 1. Fragments are clustered into rows by baseline (`row_tolerance`).
//! 2. Within a row, fragments closer than `column_tolerance` are merged into
//!    one cell.
//! 3. Two or more consecutive rows holding at least two cells form a table.
//! 4. Column anchors are clustered from the left edges of every cell in the
//!    table; each cell goes to its nearest anchor. Anchors a row does not
//!    reach stay `None`.

use std::cmp::Ordering;

/// A row-major grid of optional cell strings, as produced by a parser.
pub type RawTable = Vec<Vec<Option<String>>>;

/// A piece of text with its position on the page.
///
/// Coordinates are PDF user space: `y` grows upwards, so the first row of a
/// page has the largest `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    /// Text content
    pub text: String,
    /// Left edge
    pub x: f32,
    /// Baseline
    pub y: f32,
    /// Horizontal extent
    pub width: f32,
}

impl TextFragment {
    /// Create a fragment.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
        }
    }

    fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// A merged cell inside a detected row.
#[derive(Debug, Clone)]
struct RowCell {
    text: String,
    x: f32,
    right: f32,
}

fn float_cmp(a: f32, b: f32) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Detect table grids among `fragments`.
///
/// Tables are returned top to bottom.
pub fn detect_grids(
    fragments: &[TextFragment],
    row_tolerance: f32,
    column_tolerance: f32,
) -> Vec<RawTable> {
    let rows = group_rows(fragments, row_tolerance, column_tolerance);

    let mut tables = Vec::new();
    let mut run: Vec<Vec<RowCell>> = Vec::new();
    for row in rows {
        if row.len() >= 2 {
            run.push(row);
            continue;
        }
        if run.len() >= 2 {
            tables.push(build_grid(&run, column_tolerance));
        }
        run.clear();
    }
    if run.len() >= 2 {
        tables.push(build_grid(&run, column_tolerance));
    }

    log::debug!(
        "Detected {} table grid(s) among {} fragments",
        tables.len(),
        fragments.len()
    );
    tables
}

/// Cluster fragments into rows (top to bottom) of merged cells (left to right).
fn group_rows(
    fragments: &[TextFragment],
    row_tolerance: f32,
    column_tolerance: f32,
) -> Vec<Vec<RowCell>> {
    let mut sorted: Vec<&TextFragment> = fragments
        .iter()
        .filter(|f| !f.text.trim().is_empty())
        .collect();
    sorted.sort_by(|a, b| float_cmp(b.y, a.y).then(float_cmp(a.x, b.x)));

    let mut rows: Vec<Vec<&TextFragment>> = Vec::new();
    let mut row_y = f32::NAN;
    for fragment in sorted {
        match rows.last_mut() {
            Some(row) if (row_y - fragment.y).abs() <= row_tolerance => row.push(fragment),
            _ => {
                row_y = fragment.y;
                rows.push(vec![fragment]);
            },
        }
    }

    rows.into_iter()
        .map(|mut row| {
            row.sort_by(|a, b| float_cmp(a.x, b.x));
            merge_cells(&row, column_tolerance)
        })
        .collect()
}

fn merge_cells(row: &[&TextFragment], column_tolerance: f32) -> Vec<RowCell> {
    let mut cells: Vec<RowCell> = Vec::new();
    for fragment in row {
        let text = fragment.text.trim();
        match cells.last_mut() {
            Some(cell) if fragment.x - cell.right <= column_tolerance => {
                cell.text.push(' ');
                cell.text.push_str(text);
                cell.right = cell.right.max(fragment.right());
            },
            _ => cells.push(RowCell {
                text: text.to_string(),
                x: fragment.x,
                right: fragment.right(),
            }),
        }
    }
    cells
}

fn build_grid(rows: &[Vec<RowCell>], column_tolerance: f32) -> RawTable {
    let mut edges: Vec<f32> = rows.iter().flatten().map(|c| c.x).collect();
    edges.sort_by(|a, b| float_cmp(*a, *b));

    // Each anchor is the left-most edge of its cluster
    let mut anchors: Vec<f32> = Vec::new();
    for x in edges {
        match anchors.last() {
            Some(&last) if x - last <= column_tolerance => {},
            _ => anchors.push(x),
        }
    }

    rows.iter()
        .map(|row| {
            let mut grid_row: Vec<Option<String>> = vec![None; anchors.len()];
            for cell in row {
                let column = nearest_anchor(&anchors, cell.x);
                match &mut grid_row[column] {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(&cell.text);
                    },
                    slot => *slot = Some(cell.text.clone()),
                }
            }
            grid_row
        })
        .collect()
}

fn nearest_anchor(anchors: &[f32], x: f32) -> usize {
    anchors
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| float_cmp((*a - x).abs(), (*b - x).abs()))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
