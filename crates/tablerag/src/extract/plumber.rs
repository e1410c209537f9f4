//! Text-box grouping fallback.
//!
//! Used when neither ruled lines nor clean whitespace alignment exist; its
//! tolerances are the widest of the three strategies, trading precision for
//! coverage. It has no configuration knobs since it is itself the fallback
//! of last resort.
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::pdf::PdfTextExtractor;
use crate::types::{Strategy, Table};

use super::geometry::extract_grid_tables;
use super::strategy::TableStrategy;

const ROW_TOLERANCE: f32 = 6.0;
const COLUMN_GAP: f32 = 20.0;

#[derive(Default)]
pub struct PlumberStrategy;

impl PlumberStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TableStrategy for PlumberStrategy {
    fn strategy(&self) -> Strategy {
        Strategy::Plumber
    }

    async fn extract(
        &self,
        extractor: Arc<PdfTextExtractor>,
        pdf_path: Arc<PathBuf>,
        pages: Arc<Vec<usize>>,
    ) -> Result<Vec<Table>> {
        tokio::task::spawn_blocking(move || {
            extract_grid_tables(&extractor, &pdf_path, &pages, Strategy::Plumber, ROW_TOLERANCE, COLUMN_GAP)
        })
        .await
        .map_err(super::join_error)?
    }
}
