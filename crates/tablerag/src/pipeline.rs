//! Top-level request pipeline: routes PDF vs. non-PDF input through
//! extraction, normalization, deduplication, emission, and chunking.
use std::sync::Arc;

use crate::chunk::chunk_documents;
use crate::config::Config;
use crate::dedupe::sort_and_dedupe;
use crate::emit::emit_table;
use crate::error::Result;
use crate::extract::extract_tables;
use crate::fallback::{basic_text_fallback, pdf_text_fallback};
use crate::normalize::normalize_table;
use crate::pdf::{PdfTextExtractor, RequestPdfFile};
use crate::types::{table_id, Document};

/// Decides whether `body` should be routed down the PDF pipeline based on
/// the request's `Content-Type` header and optional filename.
pub fn is_pdf_input(content_type: Option<&str>, filename: Option<&str>) -> bool {
    let content_type_is_pdf = content_type.is_some_and(|ct| ct.to_lowercase().contains("pdf"));
    let filename_is_pdf = filename.is_some_and(|name| name.to_lowercase().ends_with(".pdf"));
    content_type_is_pdf || filename_is_pdf
}

/// Runs the full table-extraction pipeline over PDF bytes, falling back to
/// whole-document text when no table survives normalization and dedupe.
///
/// The uploaded bytes are written to exactly one request-scoped temporary
/// file — pdfium's file-based loader needs a real path, and the
/// [`RequestPdfFile`] guard deletes it on every exit from this function,
/// including an early return via `?` or a panic unwinding through it.
pub async fn process_pdf(bytes: &[u8], source: &str, config: &Config) -> Result<Vec<Document>> {
    let scratch_file = RequestPdfFile::write(bytes)?;
    let pdf_path = Arc::new(scratch_file.path_buf());
    let extractor = Arc::new(PdfTextExtractor::new()?);

    let raw_tables = extract_tables(pdf_path.clone(), extractor.clone(), config).await?;
    let normalized: Vec<_> = raw_tables.into_iter().filter_map(|table| normalize_table(table, config)).collect();
    let deduped = sort_and_dedupe(normalized);

    let documents = if deduped.is_empty() {
        vec![pdf_text_fallback(&extractor, pdf_path.as_path(), source, config)]
    } else {
        let mut documents = Vec::new();
        let mut ordinal_by_page: std::collections::BTreeMap<usize, usize> = std::collections::BTreeMap::new();
        for table in &deduped {
            let ordinal = ordinal_by_page.entry(table.page).or_insert(0);
            *ordinal += 1;
            let hash = table.content_hash.as_deref().unwrap_or_default();
            let id = table_id(table.page, *ordinal, hash);
            documents.extend(emit_table(table, &id, source));
        }
        documents
    };

    Ok(chunk_documents(documents, config))
}

/// Decodes non-PDF bytes as best-effort text and chunks the result.
pub fn process_text(bytes: &[u8], source: &str, config: &Config) -> Vec<Document> {
    chunk_documents(vec![basic_text_fallback(bytes, source)], config)
}
