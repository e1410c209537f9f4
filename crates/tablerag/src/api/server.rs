//! API router assembly and server startup.
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::{IngestError, Result};

use super::auth::require_bearer_token;
use super::handlers::{health_handler, process_handler};
use super::types::ApiState;

/// Builds the router: an unauthenticated `/health` route, and a
/// Bearer-token-guarded `/process` route behind a body-size limit matching
/// `config.max_request_body_bytes`.
pub fn create_router(config: Arc<Config>) -> Router {
    let state = ApiState { config: config.clone() };
    let max_body_bytes = config.max_request_body_bytes;

    let protected = Router::new()
        .route("/process", put(process_handler))
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer_token));

    Router::new()
        .route("/health", get(health_handler))
        .merge(protected)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds `config.host:config.port` and serves until a Ctrl-C signal arrives.
pub async fn serve(config: Arc<Config>) -> Result<()> {
    let ip: IpAddr = config
        .host
        .parse()
        .map_err(|e| IngestError::config(format!("invalid HOST address '{}': {e}", config.host)))?;
    let addr = SocketAddr::new(ip, config.port);

    let app = create_router(config);

    tracing::info!(%addr, "starting table-extraction ingestion server");
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
