//! Turns each deduplicated table into its markdown snapshot document and,
//! when the first column looks entity-like, one row-level document per row.
use crate::normalize::is_numeric_cell;
use crate::types::{Document, DocumentFormat, Metadata, Table};

const ENTITY_LIKENESS_THRESHOLD: f64 = 0.7;

fn escape_pipe_cell(cell: &str) -> String {
    cell.replace('|', "\\|")
}

/// Renders a table as a GitHub-style pipe table with a header separator row.
pub fn render_markdown(table: &Table) -> String {
    let header = format!("| {} |", table.columns.iter().map(|c| escape_pipe_cell(c)).collect::<Vec<_>>().join(" | "));
    let separator = format!("|{}|", table.columns.iter().map(|_| " --- ").collect::<Vec<_>>().join("|"));
    let mut lines = vec![header, separator];
    for row in &table.rows {
        lines.push(format!("| {} |", row.iter().map(|c| escape_pipe_cell(c)).collect::<Vec<_>>().join(" | ")));
    }
    lines.join("\n")
}

/// A data cell counts as non-numeric, and therefore entity-like, if it
/// contains at least one character that is not a digit, whitespace, decimal
/// separator, currency sign, or sign character.
fn is_entity_like_cell(cell: &str) -> bool {
    !cell.is_empty() && !is_numeric_cell(cell)
}

/// At least 70% of column-0 data cells must be non-empty and non-numeric. A
/// table with no data rows is never entity-like.
fn first_column_is_entity_like(table: &Table) -> bool {
    if table.rows.is_empty() {
        return false;
    }
    let entity_like_count =
        table.rows.iter().filter(|row| row.first().is_some_and(|cell| is_entity_like_cell(cell))).count();
    (entity_like_count as f64 / table.rows.len() as f64) >= ENTITY_LIKENESS_THRESHOLD
}

fn render_row_kv(table: &Table, row: &[String]) -> Option<String> {
    let lines: Vec<String> = table
        .columns
        .iter()
        .zip(row.iter())
        .filter(|(header, value)| !header.is_empty() && !value.is_empty())
        .map(|(header, value)| format!("{header}: {value}"))
        .collect();
    if lines.is_empty() { None } else { Some(lines.join("\n")) }
}

/// Emits the markdown snapshot document for `table`, then — if the first
/// column is entity-like — one row-level document per data row, in row
/// order. `source` and `extractor` are inherited by every emitted document.
pub fn emit_table(table: &Table, table_id: &str, source: &str) -> Vec<Document> {
    let extractor = table.strategy.as_str().to_string();
    let mut documents = Vec::with_capacity(1 + table.rows.len());

    let mut snapshot_metadata = Metadata::new(source, extractor.clone(), DocumentFormat::TableMd);
    snapshot_metadata.page = Some(table.page);
    snapshot_metadata.table_id = Some(table_id.to_string());
    documents.push(Document::new(render_markdown(table), snapshot_metadata));

    if first_column_is_entity_like(table) {
        for row in &table.rows {
            let Some(text) = render_row_kv(table, row) else { continue };
            let mut metadata = Metadata::new(source, extractor.clone(), DocumentFormat::RowKv);
            metadata.page = Some(table.page);
            metadata.table_id = Some(table_id.to_string());
            documents.push(Document::new(text, metadata));
        }
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Strategy;

    fn sample_table() -> Table {
        Table::new(
            vec!["Country".into(), "Price".into()],
            vec![vec!["Argentine".into(), "0,27 €".into()], vec!["Brazil".into(), "0,19 €".into()]],
            1,
            Strategy::Lattice,
        )
    }

    #[test]
    fn renders_github_style_pipe_table() {
        let md = render_markdown(&sample_table());
        assert!(md.starts_with("| Country | Price |"));
        assert!(md.contains("| --- | --- |"));
        assert!(md.contains("| Argentine | 0,27 € |"));
    }

    #[test]
    fn entity_like_column_triggers_row_kv_emission() {
        let docs = emit_table(&sample_table(), "p001_t001_abcdef01", "prices.pdf");
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].metadata.format, DocumentFormat::TableMd);
        assert_eq!(docs[1].text, "Country: Argentine\nPrice: 0,27 €");
        assert_eq!(docs[2].text, "Country: Brazil\nPrice: 0,19 €");
        assert!(docs.iter().all(|d| d.metadata.table_id.as_deref() == Some("p001_t001_abcdef01")));
    }

    #[test]
    fn row_kv_round_trip_matches_spec_example() {
        let table = Table::new(vec!["A".into(), "B".into()], vec![vec!["x".into(), "1".into()]], 1, Strategy::Lattice);
        let text = render_row_kv(&table, &table.rows[0]).unwrap();
        assert_eq!(text, "A: x\nB: 1");
    }

    #[test]
    fn all_numeric_first_column_suppresses_row_kv() {
        let table = Table::new(
            vec!["Id".into(), "Name".into()],
            vec![vec!["1".into(), "a".into()], vec!["2".into(), "b".into()], vec!["3".into(), "c".into()]],
            1,
            Strategy::Lattice,
        );
        let docs = emit_table(&table, "p001_t001_abcdef01", "s.pdf");
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn partially_numeric_first_column_at_threshold_still_emits_rows() {
        let table = Table::new(
            vec!["Name".into(), "V".into()],
            vec![
                vec!["Alice".into(), "1".into()],
                vec!["Bob".into(), "2".into()],
                vec!["Carol".into(), "3".into()],
                vec!["42".into(), "4".into()],
            ],
            1,
            Strategy::Lattice,
        );
        let docs = emit_table(&table, "p001_t001_abcdef01", "s.pdf");
        assert_eq!(docs.len(), 5);
    }

    #[test]
    fn row_kv_skips_empty_value_pairs() {
        let table = Table::new(
            vec!["Name".into(), "Note".into()],
            vec![vec!["Alice".into(), "".into()]],
            1,
            Strategy::Lattice,
        );
        let text = render_row_kv(&table, &table.rows[0]).unwrap();
        assert_eq!(text, "Name: Alice");
    }
}
