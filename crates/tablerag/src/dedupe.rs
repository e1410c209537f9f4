//! Canonical content hashing and cross-strategy deduplication.
use std::collections::HashSet;

use sha2::{Digest, Sha256};

use crate::types::Table;

const FIELD_SEPARATOR: char = '\u{1f}';
const ROW_SEPARATOR: char = '\u{1e}';

/// Hashes a normalized table's headers and data rows into a stable,
/// content-addressed identity: two tables with identical normalized content
/// hash identically regardless of which strategy or page produced them.
pub fn content_hash(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(headers.join(&FIELD_SEPARATOR.to_string()));
    for row in rows {
        lines.push(row.join(&FIELD_SEPARATOR.to_string()));
    }
    let canonical = lines.join(&ROW_SEPARATOR.to_string());

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    hex::encode(hasher.finalize())
}

/// Sorts normalized tables by `(page, strategy_rank, content_hash)` and
/// keeps only the first occurrence of each content hash — since lattice
/// sorts before stream before plumber, the higher-structure strategy wins
/// any tie.
pub fn sort_and_dedupe(mut tables: Vec<Table>) -> Vec<Table> {
    tables.sort_by(|a, b| {
        a.page.cmp(&b.page).then(a.strategy.rank().cmp(&b.strategy.rank())).then(a.content_hash.cmp(&b.content_hash))
    });

    let mut seen: HashSet<String> = HashSet::new();
    tables
        .into_iter()
        .filter(|table| match &table.content_hash {
            Some(hash) => seen.insert(hash.clone()),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strategy;

    #[test]
    fn identical_content_hashes_identically_regardless_of_whitespace_source() {
        let headers = vec!["Country".to_string(), "Price".to_string()];
        let rows = vec![vec!["Brazil".to_string(), "0,19 €".to_string()]];
        assert_eq!(content_hash(&headers, &rows), content_hash(&headers, &rows));
    }

    #[test]
    fn different_content_hashes_differently() {
        let headers = vec!["Country".to_string(), "Price".to_string()];
        let rows_a = vec![vec!["Brazil".to_string(), "0,19 €".to_string()]];
        let rows_b = vec![vec!["Argentine".to_string(), "0,27 €".to_string()]];
        assert_ne!(content_hash(&headers, &rows_a), content_hash(&headers, &rows_b));
    }

    fn table_with(page: usize, strategy: Strategy, hash: &str) -> Table {
        let mut t = Table::new(vec!["a".into()], vec![vec!["1".into()]], page, strategy);
        t.content_hash = Some(hash.to_string());
        t
    }

    #[test]
    fn lattice_wins_ties_over_stream_and_plumber() {
        let tables = vec![
            table_with(1, Strategy::Plumber, "same"),
            table_with(1, Strategy::Lattice, "same"),
            table_with(1, Strategy::Stream, "same"),
        ];
        let result = sort_and_dedupe(tables);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].strategy, Strategy::Lattice);
    }

    #[test]
    fn distinct_hashes_all_survive() {
        let tables = vec![table_with(1, Strategy::Lattice, "a"), table_with(1, Strategy::Stream, "b")];
        assert_eq!(sort_and_dedupe(tables).len(), 2);
    }
}
