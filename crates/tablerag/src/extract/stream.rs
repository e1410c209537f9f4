//! Whitespace-alignment table detection.
//!
//! Without ruled lines to anchor on, column boundaries are inferred purely
//! from horizontal gaps between words, tuned by `CAMELOT_STREAM_EDGE_TOL`;
//! row grouping is tuned by `CAMELOT_STREAM_ROW_TOL`.
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::error::Result;
use crate::pdf::PdfTextExtractor;
use crate::types::{Strategy, Table};

use super::geometry::extract_grid_tables;
use super::strategy::TableStrategy;

pub struct StreamStrategy {
    row_tolerance: f32,
    column_gap: f32,
}

impl StreamStrategy {
    pub fn new(config: &Config) -> Self {
        Self {
            row_tolerance: config.camelot_stream_row_tol as f32,
            column_gap: (config.camelot_stream_edge_tol as f32 / 10.0).max(8.0),
        }
    }
}

#[async_trait]
impl TableStrategy for StreamStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::Stream
    }

    async fn extract(
        &self,
        extractor: Arc<PdfTextExtractor>,
        pdf_path: Arc<PathBuf>,
        pages: Arc<Vec<usize>>,
    ) -> Result<Vec<Table>> {
        let row_tolerance = self.row_tolerance;
        let column_gap = self.column_gap;
        tokio::task::spawn_blocking(move || {
            extract_grid_tables(&extractor, &pdf_path, &pages, Strategy::Stream, row_tolerance, column_gap)
        })
        .await
        .map_err(super::join_error)?
    }
}
