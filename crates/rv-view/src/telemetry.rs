//! Session-scoped deduplication of failed-search reports.

use std::collections::HashSet;

use rv_core::SearchLogEntry;

/// Terms already reported in this session, keyed by their lowercase form.
#[derive(Debug, Clone)]
pub struct ReportedTerms {
    seen: HashSet<String>,
    min_len: usize,
}

impl Default for ReportedTerms {
    fn default() -> Self {
        Self::new(3)
    }
}

impl ReportedTerms {
    #[must_use]
    pub fn new(min_len: usize) -> Self {
        Self {
            seen: HashSet::new(),
            min_len,
        }
    }

    /// Whether `term` is long enough to be worth reporting.
    #[must_use]
    pub fn qualifies(&self, term: &str) -> bool {
        term.trim().chars().count() >= self.min_len
    }

    /// Record a zero-result search, returning the entry to post the first
    /// time a term (case-insensitively) comes through.
    pub fn record(&mut self, term: &str) -> Option<SearchLogEntry> {
        let term = term.trim();
        if !self.qualifies(term) {
            return None;
        }
        if !self.seen.insert(term.to_lowercase()) {
            tracing::debug!(term, "search already reported this session");
            return None;
        }
        Some(SearchLogEntry::zero_results(term))
    }

    #[must_use]
    pub fn contains(&self, term: &str) -> bool {
        self.seen.contains(&term.trim().to_lowercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
