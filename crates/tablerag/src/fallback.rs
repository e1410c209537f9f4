//! Whole-document text fallbacks used when table extraction yields nothing.
use std::path::Path;

use crate::config::Config;
use crate::pdf::PdfTextExtractor;
use crate::text::decode_best_effort;
use crate::types::{Document, DocumentFormat, Metadata};

const OCR_REQUIRED_MESSAGE: &str =
    "No extractable text was found in this document; it likely requires OCR to process.";
const EMPTY_INPUT_MESSAGE: &str = "The uploaded file was empty or could not be decoded as text.";

/// Concatenates per-page extracted text up to `config.max_text_pages`. Always
/// returns exactly one document — if no text could be extracted at all, the
/// document explains that OCR is likely required, so a caller never sees an
/// empty response.
pub fn pdf_text_fallback(extractor: &PdfTextExtractor, pdf_path: &Path, source: &str, config: &Config) -> Document {
    let page_count = extractor.page_count(pdf_path).unwrap_or(0);
    let pages_to_read = page_count.min(config.max_text_pages);

    let mut combined = String::new();
    for page_index in 0..pages_to_read {
        match extractor.extract_page(pdf_path, page_index) {
            Ok(page_text) if !page_text.text.trim().is_empty() => {
                if !combined.is_empty() {
                    combined.push_str("\n\n");
                }
                combined.push_str(page_text.text.trim());
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(page = page_index, error = %err, "skipping page in text fallback");
            }
        }
    }

    let mut metadata = Metadata::new(source, "fallback_text", DocumentFormat::FallbackText);
    if combined.is_empty() {
        metadata.format = DocumentFormat::FallbackText;
        Document::new(OCR_REQUIRED_MESSAGE, metadata)
    } else {
        Document::new(combined, metadata)
    }
}

/// Best-effort decodes non-PDF input as text. Always returns exactly one
/// document; empty or undecodable input yields an explanatory document
/// rather than an empty string.
pub fn basic_text_fallback(bytes: &[u8], source: &str) -> Document {
    let metadata = Metadata::new(source, "basic_text", DocumentFormat::BasicText);
    if bytes.is_empty() {
        return Document::new(EMPTY_INPUT_MESSAGE, metadata);
    }

    let decoded = decode_best_effort(bytes, None);
    if decoded.trim().is_empty() {
        Document::new(EMPTY_INPUT_MESSAGE, metadata)
    } else {
        Document::new(decoded, metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_text_fallback_decodes_utf8() {
        let doc = basic_text_fallback("hello world".as_bytes(), "notes.txt");
        assert_eq!(doc.text, "hello world");
        assert_eq!(doc.metadata.format, DocumentFormat::BasicText);
    }

    #[test]
    fn basic_text_fallback_reports_empty_input() {
        let doc = basic_text_fallback(&[], "notes.txt");
        assert_eq!(doc.text, EMPTY_INPUT_MESSAGE);
    }

    #[test]
    fn basic_text_fallback_reports_whitespace_only_input() {
        let doc = basic_text_fallback("   \n\t  ".as_bytes(), "notes.txt");
        assert_eq!(doc.text, EMPTY_INPUT_MESSAGE);
    }
}
