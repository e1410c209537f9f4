//! HTTP request/response DTOs.
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::types::{Document, Metadata};

/// Shared, immutable state handed to every request handler.
#[derive(Clone)]
pub struct ApiState {
    pub config: Arc<Config>,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

/// One element of the `PUT /process` response array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub page_content: String,
    pub metadata: Metadata,
}

impl From<Document> for ProcessedDocument {
    fn from(document: Document) -> Self {
        Self {
            page_content: document.text,
            metadata: document.metadata,
        }
    }
}

pub type ProcessResponse = Vec<ProcessedDocument>;
