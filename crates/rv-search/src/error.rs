//! Search error types for rv-search.

/// Errors from building or querying search indexes.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The source document could not be decoded.
    #[error("document error: {0}")]
    Document(#[from] rv_core::CoreError),

    /// Invalid search parameters.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
}
