//! View-models for the rule list.
//!
//! Rendering is split in two: this module decides *what* each row shows
//! (highlighted title, category badge, search excerpts, expanded detail);
//! a front-end decides how to paint it.

use rv_core::text::{NO_CONTENT, non_empty, paragraphs, truncate_chars};
use rv_core::{RecordId, Rule, links};
use rv_search::excerpt::rule_search_excerpts;
use rv_search::highlight::{self, Segment};
use rv_search::{MatchField, Needle, first_match_field};
use serde::Serialize;

use crate::controller::ViewController;

/// Collapsed previews are cut to this many characters.
pub const PREVIEW_CHARS: usize = 160;

/// Owned highlight run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkedSegment {
    pub text: String,
    pub matched: bool,
}

/// Text split into plain and matched runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MarkedText {
    pub segments: Vec<MarkedSegment>,
}

impl MarkedText {
    #[must_use]
    pub fn new(text: &str, term: &str) -> Self {
        Self {
            segments: highlight::highlight(text, term)
                .into_iter()
                .map(|segment| MarkedSegment {
                    text: segment.text.to_string(),
                    matched: segment.matched,
                })
                .collect(),
        }
    }

    fn borrowed(&self) -> Vec<Segment<'_>> {
        self.segments
            .iter()
            .map(|s| Segment {
                text: &s.text,
                matched: s.matched,
            })
            .collect()
    }

    #[must_use]
    pub fn has_match(&self) -> bool {
        highlight::has_match(&self.borrowed())
    }

    /// Flatten, wrapping matches in `open`/`close`.
    #[must_use]
    pub fn to_marked(&self, open: &str, close: &str) -> String {
        highlight::mark(&self.borrowed(), open, close)
    }

    #[must_use]
    pub fn plain(&self) -> String {
        self.to_marked("", "")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletView {
    pub text: MarkedText,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub title: Option<MarkedText>,
    pub bullets: Vec<BulletView>,
}

/// Content of an expanded row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDetail {
    pub paragraphs: Vec<MarkedText>,
    pub cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleListItem {
    pub id: RecordId,
    pub position: usize,
    pub title: MarkedText,
    /// Omitted when it repeats the list-wide category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<MarkedText>,
    pub expanded: bool,
    pub focused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_in: Option<MatchField>,
    /// Search excerpts under a collapsed row; empty without a search.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<MarkedText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<RuleDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListStatus {
    Loading,
    Empty { term: String },
    Few { count: usize },
    Results { count: usize },
}

/// "3/7" indicator for search-result navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchPosition {
    pub current: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub status: ListStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_category: Option<String>,
    pub items: Vec<RuleListItem>,
    pub ask_href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_position: Option<SearchPosition>,
}

/// Collapsed preview: the rule's preview text cut to [`PREVIEW_CHARS`], or
/// the no-content placeholder.
#[must_use]
pub fn preview_text(rule: &Rule) -> String {
    match non_empty(rule.preview()) {
        Some(preview) => truncate_chars(preview, PREVIEW_CHARS),
        None => NO_CONTENT.to_string(),
    }
}

/// Expanded content: body paragraphs then cards. A rule with neither gets
/// the placeholder paragraph.
#[must_use]
pub fn rule_detail(rule: &Rule, term: &str) -> RuleDetail {
    let paragraphs: Vec<MarkedText> = rule
        .body_text()
        .map(|body| paragraphs(body).into_iter().map(|p| MarkedText::new(p, term)).collect())
        .unwrap_or_default();
    let cards: Vec<CardView> = rule
        .cards
        .iter()
        .map(|card| CardView {
            title: non_empty(&card.title).map(|title| MarkedText::new(title, term)),
            bullets: card
                .bullets
                .iter()
                .filter_map(|bullet| {
                    non_empty(&bullet.text).map(|text| BulletView {
                        text: MarkedText::new(text, term),
                        tags: bullet.tags.clone(),
                    })
                })
                .collect(),
        })
        .collect();

    if paragraphs.is_empty() && cards.iter().all(|card| card.bullets.is_empty() && card.title.is_none()) {
        return RuleDetail {
            paragraphs: vec![MarkedText::new(NO_CONTENT, "")],
            cards: Vec::new(),
        };
    }
    RuleDetail { paragraphs, cards }
}

fn list_item(
    rule: &Rule,
    position: usize,
    controller: &ViewController,
    global_category: Option<&str>,
    needle: Option<&Needle>,
) -> RuleListItem {
    let term = controller.search().trim();
    let expanded = controller.expanded() == Some(&rule.id);

    let category = rule
        .category_name()
        .filter(|category| global_category != Some(*category))
        .map(|category| MarkedText::new(category, term));

    let summary = if needle.is_some() && !expanded {
        let excerpts = rule_search_excerpts(rule, term);
        if excerpts.is_empty() {
            vec![MarkedText::new(&preview_text(rule), term)]
        } else {
            excerpts.iter().map(|e| MarkedText::new(e, term)).collect()
        }
    } else {
        Vec::new()
    };

    RuleListItem {
        id: rule.id.clone(),
        position,
        title: MarkedText::new(&rule.title, term),
        category,
        expanded,
        focused: controller.focus_index() == position,
        matched_in: needle.and_then(|needle| first_match_field(rule, needle)),
        summary,
        detail: expanded.then(|| rule_detail(rule, term)),
    }
}

/// Build the whole list view from controller state.
#[must_use]
pub fn render_list(controller: &ViewController, ask_path: &str) -> ListView {
    let needle = Needle::new(controller.search());
    let global_category = controller.store().global_category();
    let filtered = controller.filtered();

    let items = filtered
        .iter()
        .enumerate()
        .map(|(position, rule)| list_item(rule, position, controller, global_category, needle.as_ref()))
        .collect();

    let search_position = controller.can_navigate_search().then(|| SearchPosition {
        current: (controller.search_cursor() + 1).min(filtered.len()),
        total: filtered.len(),
    });

    ListView {
        status: controller.status(),
        global_category: global_category.map(str::to_string),
        items,
        ask_href: links::ask_href(ask_path, controller.search()),
        search_position,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rv_core::{Bullet, Card};

    use super::*;

    fn bare(id: &str, body: Option<&str>, bullets: &[&str]) -> Rule {
        Rule {
            id: RecordId::from(id),
            title: format!("Rule {id}"),
            slug: None,
            category: None,
            body: body.map(str::to_string),
            cards: vec![Card {
                id: RecordId::from("c"),
                title: String::new(),
                bullets: bullets
                    .iter()
                    .map(|text| Bullet {
                        id: RecordId::from("b"),
                        text: (*text).into(),
                        tags: vec!["tag".into()],
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn preview_is_truncated_or_placeholder() {
        let long = "x".repeat(200);
        let preview = preview_text(&bare("1", Some(&long), &[]));
        assert_eq!(preview.chars().count(), PREVIEW_CHARS + 1);
        assert!(preview.ends_with('…'));

        assert_eq!(preview_text(&bare("2", None, &["  "])), NO_CONTENT);
        assert_eq!(preview_text(&bare("3", None, &["", "second"])), "second");
    }

    #[test]
    fn detail_splits_body_paragraphs() {
        let rule = bare("1", Some("First part.\n\nSecond part."), &["Keep it short"]);
        let detail = rule_detail(&rule, "part");
        assert_eq!(detail.paragraphs.len(), 2);
        assert!(detail.paragraphs.iter().all(MarkedText::has_match));
        assert_eq!(detail.cards[0].bullets[0].tags, ["tag"]);
        assert_eq!(detail.cards[0].title, None);
    }

    #[test]
    fn empty_rule_detail_is_placeholder() {
        let detail = rule_detail(&bare("1", None, &[]), "");
        assert_eq!(detail.paragraphs[0].plain(), NO_CONTENT);
        assert!(detail.cards.is_empty());
    }

    #[test]
    fn marked_text_wraps_matches() {
        let text = MarkedText::new("Shift handover", "shift");
        assert_eq!(text.to_marked("[", "]"), "[Shift] handover");
        assert_eq!(text.plain(), "Shift handover");
    }

    #[test]
    fn marked_text_agrees_with_search_marking() {
        let source = "Break, BREAK and break";
        let text = MarkedText::new(source, "break");
        assert!(text.has_match());
        assert_eq!(
            text.to_marked("<", ">"),
            highlight::mark(&highlight::highlight(source, "break"), "<", ">")
        );
        assert!(!MarkedText::new(source, "zzz").has_match());
    }
}
