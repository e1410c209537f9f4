//! API request handlers.
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;

use crate::pipeline::{is_pdf_input, process_pdf, process_text};

use super::error::ApiError;
use super::types::{ApiState, HealthResponse, ProcessResponse, ProcessedDocument};

/// `GET /health` — always returns `{"ok": true}` once the process is up.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { ok: true })
}

/// `PUT /process` — converts the uploaded document into RAG-ready chunks.
///
/// PDF vs. non-PDF routing is decided from `Content-Type` and `X-Filename`;
/// an empty body is rejected before any routing happens.
pub async fn process_handler(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::EmptyBody);
    }

    let content_type = headers.get(axum::http::header::CONTENT_TYPE).and_then(|v| v.to_str().ok());
    let filename = headers.get("X-Filename").and_then(|v| v.to_str().ok());
    let source = filename.unwrap_or("document").to_string();

    let documents = if is_pdf_input(content_type, filename) {
        process_pdf(&body, &source, &state.config).await?
    } else {
        process_text(&body, &source, &state.config)
    };

    Ok(Json(documents.into_iter().map(ProcessedDocument::from).collect()))
}
