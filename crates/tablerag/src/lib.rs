//! Table-aware PDF ingestion pipeline.
//!
//! Converts binary documents — primarily PDFs containing complex,
//! multi-header tables — into RAG-ready documents: a markdown snapshot plus
//! entity-keyed row documents per surviving table, or best-effort text when
//! no table survives.
//!
//! # Pipeline
//!
//! 1. [`extract`] — three independent table-extraction strategies (lattice,
//!    stream, plumber) run concurrently over the PDF's pages.
//! 2. [`normalize`] — cleans cells, reconstructs multi-row headers, and
//!    gates candidates on minimum size and semantic content.
//! 3. [`dedupe`] — content-hashes surviving tables and collapses duplicates
//!    across strategies, preferring the higher-structure strategy on ties.
//! 4. [`emit`] — renders each table as markdown and, when its first column
//!    looks entity-like, as one key-value document per row.
//! 5. [`chunk`] — deterministically windows any document exceeding the
//!    configured character budget.
//!
//! [`fallback`] supplies whole-document text when no table survives, and for
//! non-PDF input entirely. [`pipeline`] wires these stages together;
//! [`api`] exposes them over HTTP.
#![deny(unsafe_code)]

pub mod chunk;
pub mod config;
pub mod dedupe;
pub mod emit;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod normalize;
pub mod pdf;
pub mod pipeline;
pub mod text;
pub mod types;

#[cfg(feature = "api")]
pub mod api;

pub use config::Config;
pub use error::{IngestError, Result};
pub use types::{Document, DocumentFormat, Metadata, Strategy, Table};
