//! HTTP surface: `GET /health` and `PUT /process`.
//!
//! `/process` requires `Authorization: Bearer <ENGINE_API_KEY>`; `/health` is
//! unauthenticated. See [`create_router`] to embed the router elsewhere, or
//! [`serve`] to run it standalone.
mod auth;
mod error;
mod handlers;
mod server;
mod types;

pub use error::ApiError;
pub use server::{create_router, serve};
pub use types::{ApiState, HealthResponse, ProcessResponse, ProcessedDocument};
