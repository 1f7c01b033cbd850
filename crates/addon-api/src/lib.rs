//! # Addon API
//!
//! Thin client for the REST API whose base URL the host injects. Endpoints
//! are resolved from the [`Environment`] template and every request carries
//! the instance's call token.

mod client;
mod envelope;
mod error;

pub use client::AddonApiClient;
pub use envelope::{ErrorResponse, WrappingResponse};
pub use error::{ApiError, Result};

// Re-export core types for convenience
pub use addon_env::{AddonId, Environment, InstanceUuid};
