//! Runs the three table-extraction strategies concurrently and merges their
//! output, tolerating per-strategy failure.
mod geometry;
mod lattice;
mod pages;
mod plumber;
mod strategy;
mod stream;

pub use pages::parse_page_selector;
pub use strategy::TableStrategy;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::Config;
use crate::error::{IngestError, Result};
use crate::pdf::PdfTextExtractor;
use crate::types::{Strategy, Table};

/// Extracts candidate tables from every page selected by `config.pdf_pages`,
/// running the lattice, stream, and plumber strategies concurrently on a
/// pool bounded by `config.extractor_workers`.
///
/// A strategy that errors or panics is logged and treated as having
/// produced zero tables; the orchestrator itself only fails if the document
/// cannot be opened at all.
pub async fn extract_tables(
    pdf_path: Arc<PathBuf>,
    extractor: Arc<PdfTextExtractor>,
    config: &Config,
) -> Result<Vec<Table>> {
    let page_count = {
        let extractor = extractor.clone();
        let pdf_path = pdf_path.clone();
        spawn_blocking_extraction(move || Ok(extractor.page_count(&pdf_path)?)).await?
    };
    let pages = Arc::new(pages::parse_page_selector(&config.pdf_pages, page_count));

    let strategies: Vec<Arc<dyn TableStrategy>> = vec![
        Arc::new(lattice::LatticeStrategy::new(config)),
        Arc::new(stream::StreamStrategy::new(config)),
        Arc::new(plumber::PlumberStrategy::new()),
    ];
    let strategy_count = strategies.len();

    let semaphore = Arc::new(Semaphore::new(config.extractor_workers.max(1)));
    let mut tasks = JoinSet::new();

    for (index, strategy) in strategies.into_iter().enumerate() {
        let semaphore = semaphore.clone();
        let extractor = extractor.clone();
        let pdf_path = pdf_path.clone();
        let pages = pages.clone();
        tasks.spawn(async move {
            let _permit = semaphore.acquire_owned().await.expect("semaphore is never closed");
            let label = strategy.strategy();
            let result = strategy.extract(extractor, pdf_path, pages).await;
            (index, label, result)
        });
    }

    // Index-tagged slots, not a map, so completion order never leaks into
    // the merged result — later sorting is the only thing that reorders.
    let mut slots: Vec<Vec<Table>> = (0..strategy_count).map(|_| Vec::new()).collect();

    while let Some(joined) = tasks.join_next().await {
        let (index, label, result) = joined.map_err(join_error)?;
        match result {
            Ok(tables) => slots[index] = tables,
            Err(err) => {
                tracing::warn!(strategy = %label, error = %err, "table extraction strategy failed, continuing with the rest");
            }
        }
    }

    Ok(slots.into_iter().flatten().collect())
}

async fn spawn_blocking_extraction<F, T>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(join_error)?
}

fn join_error(err: tokio::task::JoinError) -> IngestError {
    IngestError::internal_with_source("extractor worker task failed", std::io::Error::other(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_run_in_declared_rank_order() {
        let order = [Strategy::Lattice, Strategy::Stream, Strategy::Plumber];
        for window in order.windows(2) {
            assert!(window[0].rank() < window[1].rank());
        }
    }
}
