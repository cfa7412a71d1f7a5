//! Cross-cutting error types for Ruleview.
//!
//! Domain-specific errors (`ConfigError`, `ClientError`, `SearchError`) are
//! defined in their respective crates and converge into `anyhow` in `rv-cli`.

use thiserror::Error;

/// Errors that can be raised by any Ruleview crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A record lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A payload could not be decoded.
    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    /// Data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
