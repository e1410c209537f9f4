//! Error types for the ingestion pipeline.
//!
//! All fallible operations in this crate return [`IngestError`]. It follows the
//! same shape the rest of the service stack uses: `thiserror`-derived variants,
//! `#[source]` chains preserved, and IO errors always bubbling up unchanged so
//! that real system problems are never silently swallowed.
use thiserror::Error;

/// Result type alias using [`IngestError`].
pub type Result<T> = std::result::Result<T, IngestError>;

/// Top-level error type for the ingestion pipeline and its HTTP surface.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing error: {message}")]
    PdfParsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("invalid configuration: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("missing Authorization header")]
    MissingToken,

    #[error("invalid Authorization token")]
    InvalidToken,

    #[error("request body is empty")]
    EmptyBody,

    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        paste::paste! {
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl IngestError {
    error_constructor!(pdf_parsing, PdfParsing);
    error_constructor!(config, Config);
    error_constructor!(internal, Internal);
}

impl From<crate::pdf::PdfError> for IngestError {
    fn from(err: crate::pdf::PdfError) -> Self {
        IngestError::PdfParsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
