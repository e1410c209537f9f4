//! Bearer-token authentication middleware.
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::error::ApiError;
use super::types::ApiState;

const BEARER_PREFIX: &str = "Bearer ";

fn extract_bearer_token(request: &Request) -> Option<&str> {
    request.headers().get(AUTHORIZATION).and_then(|value| value.to_str().ok()).and_then(|value| value.strip_prefix(BEARER_PREFIX))
}

/// Rejects every request that doesn't carry `Authorization: Bearer <key>`
/// matching `config.api_key`. `GET /health` is mounted outside this layer
/// and never reaches it.
pub async fn require_bearer_token(
    State(state): State<ApiState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&request).ok_or(ApiError::MissingToken)?;
    if token != state.config.api_key {
        return Err(ApiError::InvalidToken);
    }
    Ok(next.run(request).await)
}
