//! Ruled-line table detection.
//!
//! Unlike the stream and plumber strategies, lattice first checks whether a
//! page carries an actual ruled-line grid (thin drawn path objects forming
//! rows and columns, see [`crate::pdf::lines`]) before it will consider the
//! page at all. A page with well-aligned words but no ruled lines is not a
//! lattice table, no matter how evenly its words line up — that is what
//! distinguishes this strategy from stream.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::pdf::PdfTextExtractor;
use crate::types::{Strategy, Table};

use super::geometry::{grid_from_ruled_lines, words_to_grid};
use super::strategy::TableStrategy;

/// Row tolerance used only as a fallback when a page has ruled lines but
/// they don't cleanly bound every word (merged cells, stray strokes).
const FALLBACK_ROW_TOLERANCE: f32 = 3.0;

pub struct LatticeStrategy {
    column_gap: f32,
}

impl LatticeStrategy {
    pub fn new(config: &Config) -> Self {
        Self { column_gap: (config.camelot_lattice_line_scale as f32 / 2.0).max(5.0) }
    }
}

#[async_trait]
impl TableStrategy for LatticeStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::Lattice
    }

    async fn extract(
        &self,
        extractor: Arc<PdfTextExtractor>,
        pdf_path: Arc<PathBuf>,
        pages: Arc<Vec<usize>>,
    ) -> Result<Vec<Table>> {
        let column_gap = self.column_gap;
        tokio::task::spawn_blocking(move || extract_sync(&extractor, &pdf_path, &pages, column_gap))
            .await
            .map_err(super::join_error)?
    }
}

fn extract_sync(extractor: &PdfTextExtractor, pdf_path: &Path, pages: &[usize], column_gap: f32) -> Result<Vec<Table>> {
    let mut tables = Vec::new();

    for &page_index in pages {
        let lines = extractor.page_ruled_lines(pdf_path, page_index)?;
        if !lines.is_grid() {
            // No ruled-line grid on this page: lattice has nothing to find
            // here, leaving it to stream or plumber instead.
            continue;
        }

        let words = extractor.page_words(pdf_path, page_index)?;
        let grid = grid_from_ruled_lines(&words, &lines)
            .or_else(|| words_to_grid(&words, FALLBACK_ROW_TOLERANCE, column_gap));
        let Some(grid) = grid else {
            continue;
        };

        let columns = vec![String::new(); grid.col_count];
        tables.push(Table::new(columns, grid.rows, page_index + 1, Strategy::Lattice));
    }

    Ok(tables)
}
