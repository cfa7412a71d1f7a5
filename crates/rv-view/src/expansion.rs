//! Single-expansion state: at most one rule is open at a time.

use rv_core::RecordId;

/// Outcome of activating a rule header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// The rule was collapsed and is now the expanded one.
    Expanded,
    /// The rule was already expanded; only the scroll is requested again.
    Rescrolled,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    expanded: Option<RecordId>,
}

impl Expansion {
    #[must_use]
    pub const fn expanded(&self) -> Option<&RecordId> {
        self.expanded.as_ref()
    }

    #[must_use]
    pub fn is_expanded(&self, id: &RecordId) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    /// Header click, Enter, or Space.
    pub fn activate(&mut self, id: &RecordId) -> Activation {
        if self.is_expanded(id) {
            return Activation::Rescrolled;
        }
        self.expand(id.clone());
        Activation::Expanded
    }

    /// Expand `id` without a scroll request, collapsing any other rule.
    pub fn expand(&mut self, id: RecordId) {
        tracing::debug!(rule = %id, "expand");
        self.expanded = Some(id);
    }

    pub fn close(&mut self) {
        self.expanded = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activating_another_rule_collapses_the_first() {
        let mut expansion = Expansion::default();
        let a = RecordId::from("a");
        let b = RecordId::from("b");

        assert_eq!(expansion.activate(&a), Activation::Expanded);
        assert_eq!(expansion.activate(&b), Activation::Expanded);
        assert!(!expansion.is_expanded(&a));
        assert_eq!(expansion.expanded(), Some(&b));
    }

    #[test]
    fn activating_the_open_rule_only_rescrolls() {
        let mut expansion = Expansion::default();
        let a = RecordId::from("a");
        expansion.activate(&a);
        assert_eq!(expansion.activate(&a), Activation::Rescrolled);
        assert_eq!(expansion.expanded(), Some(&a));
    }

    #[test]
    fn close_collapses_everything() {
        let mut expansion = Expansion::default();
        expansion.expand(RecordId::from("a"));
        expansion.close();
        assert_eq!(expansion.expanded(), None);
    }
}
