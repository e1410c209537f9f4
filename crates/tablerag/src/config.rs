//! Process-wide configuration, resolved once at startup from the environment.
//!
//! Mirrors the env-parsing convention used elsewhere in the service stack:
//! numeric variables fall back to their default on a missing or unparsable
//! value (logged at `warn`), while `ENGINE_API_KEY` is the sole variable
//! whose absence is fatal.
use std::env;

use crate::error::{IngestError, Result};

/// Immutable settings shared read-only across every request via `Arc`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub pdf_pages: String,
    pub max_doc_chars: usize,
    pub overlap_chars: usize,
    pub max_text_pages: usize,
    pub max_header_rows: usize,
    pub min_rows_for_table: usize,
    pub min_cols_for_table: usize,
    pub extractor_workers: usize,
    pub camelot_lattice_line_scale: u32,
    pub camelot_stream_edge_tol: u32,
    pub camelot_stream_row_tol: u32,
    pub host: String,
    pub port: u16,
    pub max_request_body_bytes: usize,
}

impl Config {
    /// Resolves configuration from environment variables.
    ///
    /// Fails only when `ENGINE_API_KEY` is unset or empty; every other
    /// variable falls back to its documented default.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("ENGINE_API_KEY")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| IngestError::config("ENGINE_API_KEY must be set"))?;

        Ok(Self {
            api_key,
            pdf_pages: env::var("PDF_PAGES").unwrap_or_else(|_| "all".to_string()),
            max_doc_chars: parse_env_or("MAX_DOC_CHARS", 6000),
            overlap_chars: parse_env_or("OVERLAP_CHARS", 800),
            max_text_pages: parse_env_or("MAX_TEXT_PAGES", 200),
            max_header_rows: parse_env_or("MAX_HEADER_ROWS", 4),
            min_rows_for_table: parse_env_or("MIN_ROWS_FOR_TABLE", 2),
            min_cols_for_table: parse_env_or("MIN_COLS_FOR_TABLE", 2),
            extractor_workers: parse_env_or("EXTRACTOR_WORKERS", 3),
            camelot_lattice_line_scale: parse_env_or("CAMELOT_LATTICE_LINE_SCALE", 40),
            camelot_stream_edge_tol: parse_env_or("CAMELOT_STREAM_EDGE_TOL", 200),
            camelot_stream_row_tol: parse_env_or("CAMELOT_STREAM_ROW_TOL", 10),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env_or("PORT", 8080),
            max_request_body_bytes: parse_env_or("MAX_REQUEST_BODY_BYTES", 50 * 1024 * 1024),
        })
    }
}

/// Parses a numeric environment variable, logging and falling back to
/// `default` when it is unset or fails to parse.
fn parse_env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(variable = name, value = %raw, "invalid value for env var, using default");
            default
        }),
        Err(_) => default,
    }
}
