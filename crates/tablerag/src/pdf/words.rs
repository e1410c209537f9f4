//! Groups pdfium's per-character positions into words, for the stream and
//! plumber table strategies, which reconstruct rows/columns from word
//! bounding boxes rather than from embedded line-art.
use pdfium_render::prelude::*;

use super::error::PdfError;

/// Horizontal gap, in PDF points, beyond which two characters belong to
/// different words.
const WORD_SPACING_THRESHOLD: f32 = 3.0;

const MIN_WORD_LENGTH: usize = 1;

/// PDF text has no OCR uncertainty; every extracted word gets this score.
const PDF_TEXT_CONFIDENCE: f64 = 95.0;

/// A single pdfium character with its bounding box, in PDF (bottom-left
/// origin) coordinates.
#[derive(Debug, Clone)]
pub struct CharInfo {
    pub text: char,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A word reconstructed from adjacent characters, with its bounding box
/// converted to top-left-origin coordinates so it composes with image-based
/// layout heuristics the same way OCR output would.
#[derive(Debug, Clone)]
pub struct Word {
    pub text: String,
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
    pub confidence: f64,
}

/// Groups characters read from a pdfium page's text object into words.
///
/// Characters are merged into the same word while they stay on the same
/// line (vertical delta within half a character height) and close enough
/// horizontally (gap under [`WORD_SPACING_THRESHOLD`]); anything else, or a
/// whitespace character, starts a new word.
pub fn group_chars_into_words(chars: PdfPageTextChars, page_height: i32) -> Result<Vec<Word>, PdfError> {
    let mut words = Vec::new();
    let mut current: Vec<CharInfo> = Vec::new();

    for pdf_char in chars.iter() {
        let bounds = pdf_char
            .loose_bounds()
            .map_err(|e| PdfError::Extraction(format!("failed to read character bounds: {e}")))?;

        let Some(ch) = pdf_char.unicode_char() else {
            continue;
        };

        let info = CharInfo {
            text: ch,
            x: bounds.left().value,
            y: bounds.bottom().value,
            width: bounds.width().value,
            height: bounds.height().value,
        };

        if info.text.is_whitespace() {
            flush_word(&mut current, &mut words, page_height);
            continue;
        }

        if should_start_new_word(&current, &info) {
            flush_word(&mut current, &mut words, page_height);
        }

        current.push(info);
    }

    flush_word(&mut current, &mut words, page_height);
    Ok(words)
}

fn flush_word(current: &mut Vec<CharInfo>, words: &mut Vec<Word>, page_height: i32) {
    if current.is_empty() {
        return;
    }
    if let Some(word) = finalize_word(current, page_height) {
        words.push(word);
    }
    current.clear();
}

fn should_start_new_word(current: &[CharInfo], new_char: &CharInfo) -> bool {
    let Some(last) = current.last() else {
        return false;
    };

    let vertical_distance = (new_char.y - last.y).abs();
    if vertical_distance > last.height * 0.5 {
        return true;
    }

    let horizontal_gap = new_char.x - (last.x + last.width);
    horizontal_gap > WORD_SPACING_THRESHOLD
}

fn finalize_word(chars: &[CharInfo], page_height: i32) -> Option<Word> {
    if chars.is_empty() {
        return None;
    }

    let text: String = chars.iter().map(|c| c.text).collect();
    if text.chars().count() < MIN_WORD_LENGTH {
        return None;
    }

    let left = chars.iter().map(|c| c.x).fold(f32::INFINITY, f32::min);
    let right = chars.iter().map(|c| c.x + c.width).fold(f32::NEG_INFINITY, f32::max);
    let bottom = chars.iter().map(|c| c.y).fold(f32::INFINITY, f32::min);
    let top = chars.iter().map(|c| c.y + c.height).fold(f32::NEG_INFINITY, f32::max);

    let width = (right - left).round().max(0.0) as u32;
    let height = (top - bottom).round().max(0.0) as u32;
    let top_in_image_coords = (page_height as f32 - top).round().max(0.0) as u32;

    Some(Word {
        text,
        left: left.round().max(0.0) as u32,
        top: top_in_image_coords,
        width,
        height,
        confidence: PDF_TEXT_CONFIDENCE,
    })
}
