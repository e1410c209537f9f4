//! PDF parsing primitives: document binding, per-page text, and character
//! geometry used by the stream/plumber table strategies.
mod error;
mod lines;
mod pdfium;
mod scratch;
mod text;
mod words;

pub use error::PdfError;
pub use lines::{detect_ruled_lines, RuledLines};
pub use pdfium::bind_pdfium;
pub use scratch::RequestPdfFile;
pub use text::{PageText, PdfTextExtractor};
pub use words::{group_chars_into_words, CharInfo, Word};
