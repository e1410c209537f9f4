//! Maps pipeline errors onto HTTP responses.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::IngestError;

/// Thin wrapper around [`IngestError`] plus the auth-specific failures that
/// only make sense at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("missing Authorization header")]
    MissingToken,

    #[error("invalid Authorization token")]
    InvalidToken,

    #[error("request body is empty")]
    EmptyBody,

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::EmptyBody => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::MissingToken) => StatusCode::UNAUTHORIZED,
            ApiError::Ingest(IngestError::InvalidToken) => StatusCode::FORBIDDEN,
            ApiError::Ingest(IngestError::EmptyBody) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(IngestError::PdfParsing { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Ingest(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::MissingToken | ApiError::Ingest(IngestError::MissingToken) => "missing_token",
            ApiError::InvalidToken | ApiError::Ingest(IngestError::InvalidToken) => "invalid_token",
            ApiError::EmptyBody | ApiError::Ingest(IngestError::EmptyBody) => "empty_body",
            ApiError::Ingest(IngestError::PdfParsing { .. }) => "pdf_parsing_error",
            ApiError::Ingest(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();
        let message = self.to_string();

        match status {
            StatusCode::INTERNAL_SERVER_ERROR => {
                tracing::error!(error_type, %message, "request failed");
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::BAD_REQUEST => {
                tracing::warn!(error_type, %message, "request rejected");
            }
            _ => {}
        }

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}
