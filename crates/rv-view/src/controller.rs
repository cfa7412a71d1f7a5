//! The view-state controller.

use rv_core::{RecordId, Rule};
use rv_search::{FilterQuery, Viewport, filter_rules};

use crate::effect::Effect;
use crate::expansion::{Activation, Expansion};
use crate::keyboard::{HeaderAction, Key, header_action};
use crate::render::ListStatus;
use crate::scroll::ScrollBehavior;
use crate::store::RuleStore;
use crate::telemetry::ReportedTerms;

/// Below this many hits a search counts as having "few" results.
const FEW_RESULTS: usize = 3;

/// Single-threaded owner of the list's view state.
///
/// Every mutating method returns the effects the front-end must execute.
/// The displayed list is always `filter_rules` over the current inputs, so
/// it is recomputed on demand instead of cached.
#[derive(Debug, Clone)]
pub struct ViewController {
    store: RuleStore,
    viewport: Viewport,
    search: String,
    subtheme: Option<String>,
    expansion: Expansion,
    focus: usize,
    search_cursor: usize,
    search_focused: bool,
    reported: ReportedTerms,
    telemetry: bool,
    /// Term whose search-log post may still be in flight.
    pending_report: Option<String>,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl ViewController {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            store: RuleStore::Loading,
            viewport,
            search: String::new(),
            subtheme: None,
            expansion: Expansion::default(),
            focus: 0,
            search_cursor: 0,
            search_focused: false,
            reported: ReportedTerms::default(),
            telemetry: true,
            pending_report: None,
        }
    }

    /// Replace the minimum reportable term length.
    #[must_use]
    pub fn with_min_report_len(mut self, min_len: usize) -> Self {
        self.reported = ReportedTerms::new(min_len);
        self
    }

    /// Never emit search-log effects.
    #[must_use]
    pub const fn without_telemetry(mut self) -> Self {
        self.telemetry = false;
        self
    }

    // -- Inputs ---------------------------------------------------------

    /// Rules arrived.
    pub fn load(&mut self, rules: Vec<Rule>) -> Vec<Effect> {
        tracing::debug!(count = rules.len(), "rules loaded");
        self.store = RuleStore::Ready(rules);
        self.expand_subtheme();
        self.reconcile()
    }

    /// The fetch failed. The list renders as empty.
    pub fn load_failed(&mut self, reason: impl Into<String>) -> Vec<Effect> {
        self.store = RuleStore::Failed(reason.into());
        self.reconcile()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<Effect> {
        self.viewport = viewport;
        self.reconcile()
    }

    pub fn set_search(&mut self, term: &str) -> Vec<Effect> {
        if self.search == term {
            return Vec::new();
        }
        self.search = term.to_string();
        self.reconcile()
    }

    pub fn clear_search(&mut self) -> Vec<Effect> {
        self.set_search("")
    }

    /// Select a subtheme (a rule id) or clear the selection. A selected
    /// subtheme's rule is expanded straight away.
    pub fn set_subtheme(&mut self, subtheme: Option<&str>) -> Vec<Effect> {
        self.subtheme = subtheme
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        self.expand_subtheme();
        self.reconcile()
    }

    pub const fn set_search_focus(&mut self, focused: bool) {
        self.search_focused = focused;
    }

    /// A header received focus.
    pub fn focus(&mut self, index: usize) {
        if index < self.filtered().len() {
            self.focus = index;
        }
    }

    /// Header click, Enter, or Space: expand with scroll-follow.
    pub fn activate(&mut self, id: &RecordId) -> Vec<Effect> {
        if self.expansion.activate(id) == Activation::Rescrolled {
            tracing::debug!(rule = %id, "rescroll expanded rule");
        }
        let mut effects = vec![Effect::ScrollToRule {
            id: id.clone(),
            behavior: ScrollBehavior::Smooth,
        }];
        if !self.search.trim().is_empty() {
            effects.push(Effect::CenterFirstMatch(id.clone()));
        }
        effects
    }

    pub fn close(&mut self) {
        self.expansion.close();
    }

    /// Route a key press. Header keys act on the focused header; `/` and
    /// Escape are global.
    pub fn handle_key(&mut self, key: Key) -> Vec<Effect> {
        match key {
            Key::Slash => {
                if self.search_focused {
                    return Vec::new();
                }
                self.search_focused = true;
                vec![Effect::FocusSearch]
            }
            Key::Escape => self.clear_search(),
            Key::Enter if self.search_focused => {
                if self.can_navigate_search() {
                    self.go_first()
                } else {
                    Vec::new()
                }
            }
            _ if self.search_focused => Vec::new(),
            _ => self.header_key(key),
        }
    }

    fn header_key(&mut self, key: Key) -> Vec<Effect> {
        let ids = self.filtered_ids();
        match header_action(key, self.focus, ids.len()) {
            Some(HeaderAction::MoveTo(index)) => {
                let id = ids[index].clone();
                self.focus = index;
                self.expansion.expand(id.clone());
                vec![Effect::FocusHeader(id)]
            }
            Some(HeaderAction::Activate(index)) => self.activate(&ids[index]),
            None => Vec::new(),
        }
    }

    // -- Search-result navigation ---------------------------------------

    /// A term is set, data has settled, and something matched.
    #[must_use]
    pub fn can_navigate_search(&self) -> bool {
        !self.search.trim().is_empty() && self.store.is_settled() && !self.filtered().is_empty()
    }

    pub fn go_next(&mut self) -> Vec<Effect> {
        self.go_to(self.cursor_offset(1))
    }

    pub fn go_prev(&mut self) -> Vec<Effect> {
        self.go_to(self.cursor_offset(-1))
    }

    pub fn go_first(&mut self) -> Vec<Effect> {
        self.go_to(0)
    }

    fn cursor_offset(&self, delta: i64) -> i64 {
        i64::try_from(self.search_cursor).unwrap_or(i64::MAX).saturating_add(delta)
    }

    /// Jump to a result by position, wrapping in both directions.
    fn go_to(&mut self, index: i64) -> Vec<Effect> {
        let ids = self.filtered_ids();
        let Ok(len) = i64::try_from(ids.len()) else {
            return Vec::new();
        };
        if len == 0 {
            return Vec::new();
        }
        let normalized = usize::try_from(index.rem_euclid(len)).unwrap_or_default();
        self.search_cursor = normalized;
        let id = ids[normalized].clone();
        let mut effects = self.activate(&id);
        if !effects.iter().any(|e| matches!(e, Effect::CenterFirstMatch(_))) {
            effects.push(Effect::CenterFirstMatch(id));
        }
        effects
    }

    // -- Derived state --------------------------------------------------

    /// The displayed list.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Rule> {
        filter_rules(
            self.store.rules(),
            &FilterQuery::new(&self.search, self.subtheme.as_deref(), self.viewport),
        )
    }

    fn filtered_ids(&self) -> Vec<RecordId> {
        self.filtered().into_iter().map(|rule| rule.id.clone()).collect()
    }

    #[must_use]
    pub fn status(&self) -> ListStatus {
        if self.store.is_loading() {
            return ListStatus::Loading;
        }
        let count = self.filtered().len();
        let term = self.search.trim();
        if count == 0 {
            ListStatus::Empty { term: term.to_string() }
        } else if count < FEW_RESULTS && !term.is_empty() {
            ListStatus::Few { count }
        } else {
            ListStatus::Results { count }
        }
    }

    #[must_use]
    pub const fn store(&self) -> &RuleStore {
        &self.store
    }

    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    #[must_use]
    pub fn subtheme(&self) -> Option<&str> {
        self.subtheme.as_deref()
    }

    #[must_use]
    pub const fn expanded(&self) -> Option<&RecordId> {
        self.expansion.expanded()
    }

    #[must_use]
    pub const fn focus_index(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub const fn search_cursor(&self) -> usize {
        self.search_cursor
    }

    #[must_use]
    pub const fn is_search_focused(&self) -> bool {
        self.search_focused
    }

    #[must_use]
    pub const fn reported_terms(&self) -> &ReportedTerms {
        &self.reported
    }

    // -- Reconciliation -------------------------------------------------

    fn expand_subtheme(&mut self) {
        let Some(subtheme) = self.subtheme.as_deref() else {
            return;
        };
        if let Some(rule) = self.store.rules().iter().find(|rule| rule.id.matches(subtheme)) {
            self.expansion.expand(rule.id.clone());
        }
    }

    /// Keep cursors in range and emit telemetry after any input change.
    fn reconcile(&mut self) -> Vec<Effect> {
        let len = self.filtered().len();
        if self.focus >= len {
            self.focus = 0;
        }
        if self.search_cursor >= len {
            self.search_cursor = 0;
        }
        self.failed_search_effects(len)
    }

    fn failed_search_effects(&mut self, len: usize) -> Vec<Effect> {
        let term = self.search.trim().to_string();
        let empty = self.store.is_settled() && len == 0;

        let mut effects = Vec::new();
        if let Some(pending) = self.pending_report.take() {
            if empty && pending == term {
                self.pending_report = Some(pending);
                return effects;
            }
            effects.push(Effect::CancelReport);
        }
        if !self.telemetry || !empty {
            return effects;
        }
        if let Some(entry) = self.reported.record(&term) {
            tracing::debug!(term = %entry.term, "reporting failed search");
            self.pending_report = Some(term);
            effects.push(Effect::ReportFailedSearch(entry));
        }
        effects
    }
}
