//! Deterministic character-count windowing.
//!
//! Splits purely on `char_indices()` offsets — no tokenizer, no sentence or
//! markdown-boundary awareness. The downstream indexer owns tokenization;
//! this layer only needs to produce reproducible byte-identical windows for
//! identical input.
use crate::config::Config;
use crate::types::Document;

fn char_boundaries(text: &str) -> Vec<usize> {
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    boundaries
}

/// Splits `text` into successive windows of at most `max_chars` characters,
/// each starting `max_chars - overlap_chars` characters after the previous
/// one. Returns a single-element vec unchanged if `text` already fits.
fn window_text(text: &str, max_chars: usize, overlap_chars: usize) -> Vec<String> {
    let boundaries = char_boundaries(text);
    let char_count = boundaries.len().saturating_sub(1);
    if char_count <= max_chars {
        return vec![text.to_string()];
    }

    let stride = max_chars.saturating_sub(overlap_chars).max(1);
    let mut windows = Vec::new();
    let mut start = 0;
    while start < char_count {
        let end = (start + max_chars).min(char_count);
        windows.push(text[boundaries[start]..boundaries[end]].to_string());
        if end == char_count {
            break;
        }
        start += stride;
    }
    windows
}

/// Splits one document into chunks per `config.max_doc_chars` /
/// `config.overlap_chars`. A document that already fits is returned as-is
/// with no `chunk`/`chunks_total` metadata; a split document has every chunk
/// stamped with its 1-based `chunk` index and the total count.
pub fn chunk_document(document: Document, config: &Config) -> Vec<Document> {
    let windows = window_text(&document.text, config.max_doc_chars, config.overlap_chars);
    if windows.len() == 1 {
        return vec![document];
    }

    let total = windows.len();
    windows
        .into_iter()
        .enumerate()
        .map(|(i, text)| {
            let mut metadata = document.metadata.clone();
            metadata.chunk = Some(i + 1);
            metadata.chunks_total = Some(total);
            Document::new(text, metadata)
        })
        .collect()
}

/// Chunks every document in `documents`, preserving order.
pub fn chunk_documents(documents: Vec<Document>, config: &Config) -> Vec<Document> {
    documents.into_iter().flat_map(|doc| chunk_document(doc, config)).collect()
}
