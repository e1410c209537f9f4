//! Low-level PDF parsing errors, kept separate from [`crate::error::IngestError`]
//! so that the PDF layer has no dependency on the HTTP/pipeline error type.
//!
//! IO errors are deliberately NOT convertible into [`PdfError`]: a failure to
//! read bytes off disk or network is not a parsing error and must bubble up
//! through `std::io::Error` unchanged.
use std::fmt;

#[derive(Debug)]
pub enum PdfError {
    /// The document could not be opened at all (bad header, truncated file).
    InvalidDocument(String),
    /// A password was required, missing, or rejected.
    PasswordRequired,
    /// A page index was out of bounds for the document.
    PageOutOfRange { page: usize, page_count: usize },
    /// The pdfium system library could not be located or bound.
    BindingFailed(String),
    /// Any other pdfium-render failure, carried as text since the upstream
    /// error type does not implement `std::error::Error`.
    Extraction(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::InvalidDocument(msg) => write!(f, "invalid PDF document: {msg}"),
            PdfError::PasswordRequired => write!(f, "document is password-protected"),
            PdfError::PageOutOfRange { page, page_count } => {
                write!(f, "page {page} out of range (document has {page_count} pages)")
            }
            PdfError::BindingFailed(msg) => write!(f, "failed to bind pdfium library: {msg}"),
            PdfError::Extraction(msg) => write!(f, "text extraction failed: {msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

impl From<lopdf::Error> for PdfError {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(io_err) => PdfError::Extraction(io_err.to_string()),
            other => PdfError::InvalidDocument(other.to_string()),
        }
    }
}
