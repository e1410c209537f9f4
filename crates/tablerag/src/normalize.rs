//! Cleans a raw extracted table, reconstructs its multi-row header, and
//! gates it on minimum size and semantic content before it reaches the
//! deduper.
use crate::config::Config;
use crate::dedupe::content_hash;
use crate::types::{Strategy, Table};

/// Characters that do not, by themselves, make a cell semantically
/// meaningful: digits, whitespace, decimal separators, common currency
/// signs, and the sign characters.
pub(crate) fn is_numeric_cell(cell: &str) -> bool {
    cell.chars()
        .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '.' | ',' | '€' | '$' | '£' | '¥' | '+' | '-'))
}

fn clean_cell(raw: &str) -> String {
    let folded = raw.replace('\u{00A0}', " ").replace(['\t', '\n', '\r'], " ");
    let mut result = String::with_capacity(folded.len());
    let mut prev_was_space = false;
    for ch in folded.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
            }
            prev_was_space = true;
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }
    result.trim().to_string()
}

fn clean_rows(rows: &[Vec<String>]) -> Vec<Vec<String>> {
    rows.iter().map(|row| row.iter().map(|c| clean_cell(c)).collect()).collect()
}

/// Drops columns that are empty in every row, and then rows that are empty
/// across every remaining column.
fn drop_empty_columns_and_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> (Vec<String>, Vec<Vec<String>>) {
    let col_count = columns.len();
    let keep: Vec<usize> = (0..col_count)
        .filter(|&c| rows.iter().any(|row| row.get(c).is_some_and(|cell| !cell.is_empty())))
        .collect();

    let columns: Vec<String> = keep.iter().map(|&c| columns[c].clone()).collect();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| keep.iter().map(|&c| row.get(c).cloned().unwrap_or_default()).collect())
        .filter(|row: &Vec<String>| row.iter().any(|cell| !cell.is_empty()))
        .collect();

    (columns, rows)
}

fn distinct_nonempty_token_count(row: &[String]) -> usize {
    let mut seen = std::collections::BTreeSet::new();
    for cell in row {
        if !cell.is_empty() {
            seen.insert(cell.as_str());
        }
    }
    seen.len()
}

/// The leading run of rows that make up the header.
///
/// The first row is always taken as the base header row — a clean,
/// non-spanning header has exactly as many distinct tokens as there are
/// columns, so it can never be distinguished from a data row by token count
/// alone. From the second row on, a row extends the header only while it
/// still looks like a spanning continuation: fewer distinct non-empty
/// tokens than there are columns, or at least one empty cell.
fn determine_header_row_count(rows: &[Vec<String>], col_count: usize, max_header_rows: usize) -> usize {
    if rows.is_empty() || max_header_rows == 0 {
        return 0;
    }

    let mut header_rows = 1;
    for row in rows.iter().skip(1).take(max_header_rows.saturating_sub(1)) {
        let is_spanning_continuation =
            distinct_nonempty_token_count(row) < col_count || row.iter().any(|cell| cell.is_empty());
        if is_spanning_continuation {
            header_rows += 1;
        } else {
            break;
        }
    }
    header_rows.min(max_header_rows).min(rows.len())
}

/// Carries the last non-empty cell in a row rightward into empty cells, so a
/// spanning header cell covers every column it visually spans.
fn forward_fill(row: &[String]) -> Vec<String> {
    let mut filled = row.to_vec();
    let mut last = String::new();
    for cell in &mut filled {
        if cell.is_empty() {
            *cell = last.clone();
        } else {
            last = cell.clone();
        }
    }
    filled
}

fn build_headers(rows: &[Vec<String>], header_row_count: usize, col_count: usize) -> Vec<String> {
    let filled_rows: Vec<Vec<String>> = rows[..header_row_count].iter().map(|row| forward_fill(row)).collect();

    (0..col_count)
        .map(|col| {
            let joined = filled_rows
                .iter()
                .filter_map(|row| row.get(col))
                .map(String::as_str)
                .filter(|cell| !cell.is_empty())
                .collect::<Vec<_>>()
                .join(" | ");
            if joined.is_empty() { format!("col_{col}") } else { joined }
        })
        .collect()
}

/// Runs the full normalization pipeline on one raw table, returning `None`
/// when the table fails the quality gate (too few rows/columns, or every
/// cell is purely numeric).
pub fn normalize_table(raw: Table, config: &Config) -> Option<Table> {
    let columns = raw.columns.iter().map(|c| clean_cell(c)).collect();
    let rows = clean_rows(&raw.rows);
    let (columns, rows) = drop_empty_columns_and_rows(columns, rows);

    if rows.is_empty() || columns.is_empty() {
        return None;
    }

    let header_row_count = determine_header_row_count(&rows, columns.len(), config.max_header_rows);
    let headers = build_headers(&rows, header_row_count, columns.len());
    let data_rows: Vec<Vec<String>> =
        rows[header_row_count..].iter().filter(|row| row.iter().any(|c| !c.is_empty())).cloned().collect();

    if data_rows.len() < config.min_rows_for_table || headers.len() < config.min_cols_for_table {
        return None;
    }

    let all_numeric =
        data_rows.iter().flatten().filter(|cell| !cell.is_empty()).all(|cell| is_numeric_cell(cell));
    if all_numeric {
        return None;
    }

    let hash = content_hash(&headers, &data_rows);
    let mut table = Table::new(headers, data_rows, raw.page, raw.strategy);
    table.content_hash = Some(hash);
    Some(table)
}
