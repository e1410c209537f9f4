//! Row/column clustering shared by the stream and plumber strategies.
//!
//! Stream and plumber differ only in how tightly they cluster words into
//! rows and columns (see each strategy's tolerances) — the gap-based
//! clustering algorithm itself, grounded on the word boxes reconstructed in
//! [`crate::pdf::words`], is shared between them. Lattice does not use
//! [`words_to_grid`] as its primary path: it buckets words against an
//! explicit ruled-line grid instead, via [`grid_from_ruled_lines`].
use std::path::Path;

use crate::error::Result;
use crate::pdf::{PdfTextExtractor, RuledLines, Word};
use crate::types::{Strategy, Table};

pub struct Grid {
    pub col_count: usize,
    pub rows: Vec<Vec<String>>,
}

/// Clusters words into a rectangular grid of cells.
///
/// Words within `row_tolerance` pixels of each other's top edge are treated
/// as the same row. Column boundaries are derived from the sorted set of
/// word left-edges, starting a new column whenever a gap exceeds
/// `column_gap`. Returns `None` when there are no words or fewer than two
/// rows, since a one-row grid cannot carry both a header and data.
pub fn words_to_grid(words: &[Word], row_tolerance: f32, column_gap: f32) -> Option<Grid> {
    if words.is_empty() {
        return None;
    }

    let mut sorted: Vec<&Word> = words.iter().collect();
    sorted.sort_by(|a, b| a.top.cmp(&b.top).then(a.left.cmp(&b.left)));

    let mut rows: Vec<Vec<&Word>> = Vec::new();
    for word in sorted {
        let starts_new_row = match rows.last() {
            Some(row) => (word.top as f32 - row[0].top as f32).abs() > row_tolerance,
            None => true,
        };
        if starts_new_row {
            rows.push(vec![word]);
        } else {
            rows.last_mut().expect("row was just checked non-empty").push(word);
        }
    }
    for row in &mut rows {
        row.sort_by_key(|w| w.left);
    }

    if rows.len() < 2 {
        return None;
    }

    let mut lefts: Vec<f32> = words.iter().map(|w| w.left as f32).collect();
    lefts.sort_by(|a, b| a.partial_cmp(b).expect("word coordinates are finite"));

    let mut boundaries: Vec<f32> = Vec::new();
    for x in lefts {
        if boundaries.last().is_none_or(|&b| x - b > column_gap) {
            boundaries.push(x);
        }
    }
    if boundaries.is_empty() {
        return None;
    }

    let col_count = boundaries.len();
    let grid_rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            let mut cells = vec![String::new(); col_count];
            for word in row {
                let col = boundaries
                    .iter()
                    .rposition(|&b| word.left as f32 >= b - column_gap / 2.0)
                    .unwrap_or(0)
                    .min(col_count - 1);
                if cells[col].is_empty() {
                    cells[col] = word.text.clone();
                } else {
                    cells[col].push(' ');
                    cells[col].push_str(&word.text);
                }
            }
            cells
        })
        .collect();

    Some(Grid { col_count, rows: grid_rows })
}

/// Buckets words into rows and columns using explicit ruled-line positions
/// rather than inferring boundaries from word spacing. Returns `None` when
/// the lines don't bound at least one full cell, or no words fall inside
/// the grid at all.
pub fn grid_from_ruled_lines(words: &[Word], lines: &RuledLines) -> Option<Grid> {
    if words.is_empty() || !lines.is_grid() {
        return None;
    }

    let row_count = lines.horizontal.len() - 1;
    let col_count = lines.vertical.len() - 1;

    let mut grid_rows: Vec<Vec<String>> = vec![vec![String::new(); col_count]; row_count];
    let mut populated = false;

    for word in words {
        let (Some(row), Some(col)) =
            (bucket(word.top as f32, &lines.horizontal), bucket(word.left as f32, &lines.vertical))
        else {
            continue;
        };

        let cell = &mut grid_rows[row][col];
        if cell.is_empty() {
            *cell = word.text.clone();
        } else {
            cell.push(' ');
            cell.push_str(&word.text);
        }
        populated = true;
    }

    if !populated || grid_rows.len() < 2 {
        return None;
    }

    Some(Grid { col_count, rows: grid_rows })
}

/// Finds the index `i` such that `boundaries[i] <= value < boundaries[i + 1]`.
fn bucket(value: f32, boundaries: &[f32]) -> Option<usize> {
    boundaries.windows(2).position(|w| value >= w[0] && value < w[1])
}

/// Runs [`words_to_grid`] over every requested page, skipping pages that
/// yield no usable grid.
pub fn extract_grid_tables(
    extractor: &PdfTextExtractor,
    pdf_path: &Path,
    pages: &[usize],
    strategy: Strategy,
    row_tolerance: f32,
    column_gap: f32,
) -> Result<Vec<Table>> {
    let mut tables = Vec::new();
    for &page_index in pages {
        let words = extractor.page_words(pdf_path, page_index)?;
        let Some(grid) = words_to_grid(&words, row_tolerance, column_gap) else {
            continue;
        };
        let columns = vec![String::new(); grid.col_count];
        tables.push(Table::new(columns, grid.rows, page_index + 1, strategy));
    }
    Ok(tables)
}
