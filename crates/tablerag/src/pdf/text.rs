//! Per-page text and character access used by the fallback text path and by
//! the table strategies.
use std::path::Path;

use pdfium_render::prelude::*;

use super::error::PdfError;
use super::lines::{detect_ruled_lines, RuledLines};
use super::pdfium::bind_pdfium;
use super::words::{group_chars_into_words, Word};

/// Extracted text for a single page, along with the page dimensions the
/// table strategies need to interpret word bounding boxes.
#[derive(Debug, Clone)]
pub struct PageText {
    pub page: usize,
    pub text: String,
    pub width: f32,
    pub height: f32,
}

/// Thin wrapper around a bound pdfium instance.
///
/// Each extraction call reloads the document from the request's scratch
/// file on disk (see [`super::RequestPdfFile`]) rather than caching a parsed
/// `PdfDocument`, since pdfium-render ties the document's lifetime to the
/// source it was opened from; this keeps the extractor itself `Send + Sync`
/// and safe to share across the worker pool.
pub struct PdfTextExtractor {
    pdfium: Pdfium,
}

impl PdfTextExtractor {
    pub fn new() -> Result<Self, PdfError> {
        let bindings = bind_pdfium()?;
        Ok(Self { pdfium: Pdfium::new(bindings) })
    }

    fn load(&self, path: &Path) -> Result<PdfDocument<'_>, PdfError> {
        self.pdfium.load_pdf_from_file(path, None).map_err(|e| classify_load_error(&e.to_string()))
    }

    pub fn page_count(&self, path: &Path) -> Result<usize, PdfError> {
        let document = self.load(path)?;
        Ok(document.pages().len() as usize)
    }

    /// Extracts plain text and dimensions for one 0-based page index.
    pub fn extract_page(&self, path: &Path, page_index: usize) -> Result<PageText, PdfError> {
        let document = self.load(path)?;
        let page = page_at(&document, page_index)?;
        let text = page
            .text()
            .map_err(|e| PdfError::Extraction(format!("failed to read page text: {e}")))?
            .all();

        Ok(PageText {
            page: page_index,
            text,
            width: page.width().value,
            height: page.height().value,
        })
    }

    /// Reconstructs words from character positions on one 0-based page index.
    pub fn page_words(&self, path: &Path, page_index: usize) -> Result<Vec<Word>, PdfError> {
        let document = self.load(path)?;
        let page = page_at(&document, page_index)?;
        let page_height = page.height().value as i32;
        let page_text = page
            .text()
            .map_err(|e| PdfError::Extraction(format!("failed to read page text: {e}")))?;
        group_chars_into_words(page_text.chars(), page_height)
    }

    /// Scans a 0-based page index for a ruled-line grid, used by the
    /// lattice strategy to decide whether a page has a lattice table at all.
    pub fn page_ruled_lines(&self, path: &Path, page_index: usize) -> Result<RuledLines, PdfError> {
        let document = self.load(path)?;
        let page = page_at(&document, page_index)?;
        let page_height = page.height().value;
        detect_ruled_lines(&page, page_height)
    }
}

fn page_at<'a>(document: &'a PdfDocument<'_>, page_index: usize) -> Result<PdfPage<'a>, PdfError> {
    let page_count = document.pages().len() as usize;
    document
        .pages()
        .get(page_index as u16)
        .map_err(|_| PdfError::PageOutOfRange { page: page_index, page_count })
}

fn classify_load_error(message: &str) -> PdfError {
    if message.to_lowercase().contains("password") {
        PdfError::PasswordRequired
    } else {
        PdfError::InvalidDocument(message.to_string())
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new().expect("failed to bind pdfium text extractor")
    }
}
