//! The rule filter: subtheme restriction followed by substring search.

use rv_core::Rule;
use serde::{Deserialize, Serialize};

use crate::needle::Needle;

/// Coarse viewport class. Narrow viewports are touch-first: a search there
/// spans every rule even while a subtheme is selected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Viewport {
    Narrow,
    #[default]
    Wide,
}

impl Viewport {
    #[must_use]
    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}

/// Inputs of [`filter_rules`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterQuery<'a> {
    /// Raw search input; trimmed and lowercased internally.
    pub term: &'a str,
    /// Selected subtheme (a rule id); blank means none.
    pub subtheme: Option<&'a str>,
    pub viewport: Viewport,
}

impl<'a> FilterQuery<'a> {
    #[must_use]
    pub const fn new(term: &'a str, subtheme: Option<&'a str>, viewport: Viewport) -> Self {
        Self {
            term,
            subtheme,
            viewport,
        }
    }

    fn active_subtheme(&self, needle: Option<&Needle>) -> Option<&'a str> {
        let subtheme = self.subtheme.map(str::trim).filter(|s| !s.is_empty())?;
        if self.viewport.is_narrow() && needle.is_some() {
            return None;
        }
        Some(subtheme)
    }
}

/// Which field of a rule matched a term first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    Title,
    Category,
    Bullet,
    Body,
}

impl MatchField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Category => "category",
            Self::Bullet => "bullet",
            Self::Body => "body",
        }
    }
}

/// Check title, category, bullets, then body; stop at the first hit.
#[must_use]
pub fn first_match_field(rule: &Rule, needle: &Needle) -> Option<MatchField> {
    if needle.is_in(&rule.title) {
        return Some(MatchField::Title);
    }
    if rule.category.as_deref().is_some_and(|c| needle.is_in(c)) {
        return Some(MatchField::Category);
    }
    if rule.bullet_texts().any(|text| needle.is_in(text)) {
        return Some(MatchField::Bullet);
    }
    if rule.body.as_deref().is_some_and(|b| needle.is_in(b)) {
        return Some(MatchField::Body);
    }
    None
}

/// Filter `rules`, preserving their order.
///
/// A selected subtheme restricts the list to the rule with that id, except
/// on narrow viewports while a term is entered. A blank term keeps every
/// remaining rule.
#[must_use]
pub fn filter_rules<'r>(rules: &'r [Rule], query: &FilterQuery<'_>) -> Vec<&'r Rule> {
    let needle = Needle::new(query.term);
    let subtheme = query.active_subtheme(needle.as_ref());

    rules
        .iter()
        .filter(|rule| subtheme.is_none_or(|id| rule.id.matches(id)))
        .filter(|rule| {
            needle
                .as_ref()
                .is_none_or(|needle| first_match_field(rule, needle).is_some())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use rv_core::{Bullet, Card, RecordId};

    use super::*;

    fn rule(id: &str, title: &str, category: Option<&str>, body: Option<&str>, bullets: &[&str]) -> Rule {
        Rule {
            id: RecordId::from(id),
            title: title.into(),
            slug: None,
            category: category.map(str::to_string),
            body: body.map(str::to_string),
            cards: vec![Card {
                id: RecordId::from(format!("c{id}")),
                title: String::new(),
                bullets: bullets
                    .iter()
                    .enumerate()
                    .map(|(i, text)| Bullet {
                        id: RecordId::from(format!("b{id}-{i}")),
                        text: (*text).into(),
                        tags: Vec::new(),
                    })
                    .collect(),
            }],
        }
    }

    fn fixture() -> Vec<Rule> {
        vec![
            rule("1", "Shift handover", None, Some("Arrive 10 minutes early"), &[]),
            rule("2", "Radio etiquette", Some("Communication"), None, &["Keep messages short"]),
            rule("3", "Rest breaks", Some("Routine"), Some("Rotate breaks every two hours"), &["Tell the supervisor"]),
        ]
    }

    fn ids(rules: &[&Rule]) -> Vec<String> {
        rules.iter().map(|r| r.id.to_string()).collect()
    }

    #[rstest]
    #[case("handover", &["1"])]
    #[case("HANDOVER", &["1"])]
    #[case("communication", &["2"])]
    #[case("short", &["2"])]
    #[case("minutes", &["1"])]
    #[case("r", &["1", "2", "3"])]
    #[case("  ", &["1", "2", "3"])]
    #[case("zzz-no-match", &[])]
    fn search_matches_expected_rules(#[case] term: &str, #[case] expected: &[&str]) {
        let rules = fixture();
        let out = filter_rules(&rules, &FilterQuery::new(term, None, Viewport::Wide));
        assert_eq!(ids(&out), expected);
    }

    #[test]
    fn match_field_priority_short_circuits() {
        let rule = rule("9", "Break", Some("break room"), Some("break"), &["break"]);
        let needle = Needle::new("break").unwrap();
        assert_eq!(first_match_field(&rule, &needle), Some(MatchField::Title));

        let needle = Needle::new("room").unwrap();
        assert_eq!(first_match_field(&rule, &needle), Some(MatchField::Category));
    }

    #[test]
    fn subtheme_restricts_on_wide_viewport() {
        let rules = fixture();
        let out = filter_rules(&rules, &FilterQuery::new("", Some("1"), Viewport::Wide));
        assert_eq!(ids(&out), ["1"]);

        let out = filter_rules(&rules, &FilterQuery::new("short", Some("1"), Viewport::Wide));
        assert!(out.is_empty());
    }

    #[test]
    fn narrow_viewport_search_bypasses_subtheme() {
        let rules = fixture();
        let out = filter_rules(&rules, &FilterQuery::new("short", Some("1"), Viewport::Narrow));
        assert_eq!(ids(&out), ["2"]);

        let out = filter_rules(&rules, &FilterQuery::new("", Some("1"), Viewport::Narrow));
        assert_eq!(ids(&out), ["1"]);
    }

    #[test]
    fn blank_subtheme_is_ignored() {
        let rules = fixture();
        let out = filter_rules(&rules, &FilterQuery::new("", Some(" "), Viewport::Wide));
        assert_eq!(out.len(), 3);
    }

    #[rstest]
    #[case("r")]
    #[case("break")]
    #[case("nothing")]
    fn filtering_is_idempotent(#[case] term: &str) {
        let rules = fixture();
        let query = FilterQuery::new(term, None, Viewport::Wide);
        let once: Vec<Rule> = filter_rules(&rules, &query).into_iter().cloned().collect();
        let twice: Vec<Rule> = filter_rules(&once, &query).into_iter().cloned().collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn input_is_left_untouched() {
        let rules = fixture();
        let before = rules.clone();
        let _ = filter_rules(&rules, &FilterQuery::new("radio", Some("2"), Viewport::Wide));
        assert_eq!(rules, before);
    }
}
