use rv_core::{RecordId, SearchLogEntry};

use crate::scroll::ScrollBehavior;

/// Work a front-end performs after a controller transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Move input focus to a rule's header.
    FocusHeader(RecordId),
    /// Move input focus to the search field.
    FocusSearch,
    /// Start following a rule's header with the scroll position.
    ScrollToRule {
        id: RecordId,
        behavior: ScrollBehavior,
    },
    /// Once the rule is open, center its first highlighted match.
    CenterFirstMatch(RecordId),
    /// Post a failed search to the search log.
    ReportFailedSearch(SearchLogEntry),
    /// Abort a search-log post that has not finished yet.
    CancelReport,
}
