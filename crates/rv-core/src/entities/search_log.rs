use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/search-log/`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchLogEntry {
    pub term: String,
    pub results_count: usize,
}

impl SearchLogEntry {
    /// A search that produced nothing.
    #[must_use]
    pub fn zero_results(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            results_count: 0,
        }
    }
}
