//! Core data model shared by every pipeline stage.
//!
//! Mirrors the request-scoped lifecycle described for the pipeline: [`Table`]
//! values are built by the extractors, mutated only by the normalizer, then
//! frozen once the deduper has run; [`Document`] values are produced once by
//! the emitter and never mutated afterward.
use serde::{Deserialize, Serialize};

/// One of the three independent table-extraction strategies.
///
/// Variant order is significant: [`Strategy::rank`] is the tie-break used by
/// the orchestrator's merge sort and by the deduper (lower rank wins).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Lattice,
    Stream,
    Plumber,
}

impl Strategy {
    pub fn rank(self) -> u8 {
        match self {
            Strategy::Lattice => 0,
            Strategy::Stream => 1,
            Strategy::Plumber => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Lattice => "lattice",
            Strategy::Stream => "stream",
            Strategy::Plumber => "plumber",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rectangular table candidate as produced by an extractor adapter.
///
/// `columns` holds the header row; `rows` holds the data rows. Before
/// normalization the table need not be rectangular nor have a meaningful
/// header — that is exactly what the normalizer fixes up. `content_hash`
/// is `None` until the deduper's hashing step assigns it.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub page: usize,
    pub strategy: Strategy,
    pub content_hash: Option<String>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>, page: usize, strategy: Strategy) -> Self {
        Self {
            columns,
            rows,
            page,
            strategy,
            content_hash: None,
        }
    }

    pub fn col_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_rectangular(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.columns.len())
    }
}

/// The `format` discriminant carried by every emitted document's metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentFormat {
    TableMd,
    RowKv,
    FallbackText,
    BasicText,
}

impl DocumentFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentFormat::TableMd => "table_md",
            DocumentFormat::RowKv => "row_kv",
            DocumentFormat::FallbackText => "fallback_text",
            DocumentFormat::BasicText => "basic_text",
        }
    }
}

/// Metadata attached to every emitted [`Document`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub source: String,
    pub page: Option<usize>,
    pub extractor: String,
    pub table_id: Option<String>,
    pub format: DocumentFormat,
    pub chunk: Option<usize>,
    pub chunks_total: Option<usize>,
}

impl Metadata {
    pub fn new(source: impl Into<String>, extractor: impl Into<String>, format: DocumentFormat) -> Self {
        Self {
            source: source.into(),
            page: None,
            extractor: extractor.into(),
            table_id: None,
            format,
            chunk: None,
            chunks_total: None,
        }
    }
}

/// A single unit of output text with its provenance metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub text: String,
    pub metadata: Metadata,
}

impl Document {
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// Builds the stable `p{page:03}_t{index:03}_{hash8}` table identifier.
///
/// `index` is the 1-based ordinal of the table among its surviving siblings
/// on the same page, and `content_hash` is the full hex-encoded SHA-256 hash
/// computed by the deduper; only its first 8 hex characters are embedded.
pub fn table_id(page: usize, index: usize, content_hash: &str) -> String {
    let hash8 = &content_hash[..content_hash.len().min(8)];
    format!("p{page:03}_t{index:03}_{hash8}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_rank_orders_lattice_first() {
        assert!(Strategy::Lattice.rank() < Strategy::Stream.rank());
        assert!(Strategy::Stream.rank() < Strategy::Plumber.rank());
    }

    #[test]
    fn table_id_formats_with_zero_padding() {
        let id = table_id(1, 1, "abcdef0123456789");
        assert_eq!(id, "p001_t001_abcdef01");
    }

    #[test]
    fn table_id_truncates_short_hash_safely() {
        let id = table_id(12, 3, "ab");
        assert_eq!(id, "p012_t003_ab");
    }

    #[test]
    fn table_rectangular_check() {
        let t = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into(), "2".into()], vec!["3".into()]],
            1,
            Strategy::Lattice,
        );
        assert!(!t.is_rectangular());
    }
}
