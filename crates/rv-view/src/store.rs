//! The loaded rule list.

use rv_core::{RecordId, Rule};

/// Rules fetched once at startup.
///
/// A failed fetch leaves no rules behind; it renders like an empty result
/// set and is only distinguishable through logs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RuleStore {
    #[default]
    Loading,
    Ready(Vec<Rule>),
    Failed(String),
}

impl RuleStore {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loading has finished, successfully or not.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.is_loading()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        match self {
            Self::Ready(rules) => rules,
            Self::Loading | Self::Failed(_) => &[],
        }
    }

    #[must_use]
    pub fn get(&self, id: &RecordId) -> Option<&Rule> {
        self.rules().iter().find(|rule| &rule.id == id)
    }

    /// Every rule shares this one category, so rows don't repeat it.
    #[must_use]
    pub fn global_category(&self) -> Option<&str> {
        let mut categories = self.rules().iter().filter_map(Rule::category_name);
        let first = categories.next()?;
        categories.all(|c| c == first).then_some(first)
    }
}
