use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;
use crate::pdf::PdfTextExtractor;
use crate::types::{Strategy, Table};

/// A table-extraction strategy: given a bound pdfium extractor, the path to
/// the request's scratch PDF file, and the 0-based pages to scan, produces
/// candidate tables for those pages. Implementations must not depend on one
/// another's output — the orchestrator runs every strategy and merges their
/// results afterward.
///
/// `extract` is async so the orchestrator can treat all three strategies as
/// plain futures; since the actual work is pdfium-bound and blocking, each
/// implementation moves it onto a blocking thread itself rather than
/// leaving that to the caller.
#[async_trait]
pub trait TableStrategy: Send + Sync {
    fn strategy(&self) -> Strategy;

    async fn extract(
        &self,
        extractor: Arc<PdfTextExtractor>,
        pdf_path: Arc<PathBuf>,
        pages: Arc<Vec<usize>>,
    ) -> Result<Vec<Table>>;
}
