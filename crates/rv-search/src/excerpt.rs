//! Bounded text windows around search-term occurrences.
//!
//! Window sizes are counted in characters. A window that does not reach the
//! start or end of its source text is marked with `…` on that side.

use rv_core::Rule;

use crate::needle::Needle;

const ELLIPSIS: char = '…';

/// Occurrences scanned per text before giving up.
const MAX_OCCURRENCES: usize = 80;

/// Snippets returned per rule.
const MAX_RULE_SNIPPETS: usize = 10;

/// Characters of context on each side of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub before: usize,
    pub after: usize,
}

impl Window {
    #[must_use]
    pub const fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }
}

const BODY_SINGLE: Window = Window::new(320, 480);
const CARD_TITLE: Window = Window::new(32, 64);
const LABEL: Window = Window::new(24, 64);
const BODY_MULTI: Window = Window::new(240, 360);
const BULLET_MULTI: Window = Window::new(220, 340);

/// Byte offset `n` characters before `idx` (or 0).
fn back_chars(text: &str, idx: usize, n: usize) -> usize {
    if n == 0 {
        return idx;
    }
    text[..idx]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map_or(0, |(offset, _)| offset)
}

/// Byte offset `n` characters after `idx` (or the end).
fn forward_chars(text: &str, idx: usize, n: usize) -> usize {
    text[idx..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(offset, _)| idx + offset)
}

fn decorate(text: &str, start: usize, end: usize) -> String {
    let mut out = String::new();
    if start > 0 {
        out.push(ELLIPSIS);
    }
    out.push_str(text[start..end].trim());
    if end < text.len() {
        out.push(ELLIPSIS);
    }
    out
}

/// Window around the first occurrence of `term`; empty when absent.
#[must_use]
pub fn excerpt_around(text: &str, term: &str, window: Window) -> String {
    let Some(needle) = Needle::new(term) else {
        return String::new();
    };
    let Some(hit) = needle.find(text, 0) else {
        return String::new();
    };
    let start = back_chars(text, hit.start, window.before);
    let end = forward_chars(text, hit.end, window.after);
    decorate(text, start, end)
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: usize,
    end: usize,
}

/// Windows around every occurrence of `term`, overlapping windows merged,
/// at most `max` distinct snippets.
#[must_use]
pub fn excerpts_all(text: &str, term: &str, window: Window, max: usize) -> Vec<String> {
    let Some(needle) = Needle::new(term) else {
        return Vec::new();
    };

    let mut merged: Vec<Span> = Vec::new();
    for hit in needle.find_all(text, MAX_OCCURRENCES) {
        let span = Span {
            start: back_chars(text, hit.start, window.before),
            end: forward_chars(text, hit.end, window.after),
        };
        match merged.last_mut() {
            Some(last) if span.start <= back_chars(text, last.end, window.before / 2) => {
                last.end = last.end.max(span.end);
            }
            _ => merged.push(span),
        }
    }

    let mut out: Vec<String> = Vec::new();
    for span in merged.into_iter().take(max) {
        let snippet = decorate(text, span.start, span.end);
        if !out.contains(&snippet) {
            out.push(snippet);
        }
    }
    out
}

/// Best single excerpt for a rule: body, bullets, card titles, category,
/// then title.
#[must_use]
pub fn rule_search_excerpt(rule: &Rule, term: &str) -> String {
    if term.trim().is_empty() {
        return String::new();
    }

    let body = excerpt_around(rule.body.as_deref().unwrap_or(""), term, BODY_SINGLE);
    if !body.is_empty() {
        return body;
    }

    if let Some(found) = rule
        .bullet_texts()
        .map(|text| excerpt_around(text, term, BODY_SINGLE))
        .find(|s| !s.is_empty())
    {
        return found;
    }

    if let Some(found) = rule
        .cards
        .iter()
        .map(|card| excerpt_around(&card.title, term, CARD_TITLE))
        .find(|s| !s.is_empty())
    {
        return found;
    }

    let category = excerpt_around(rule.category.as_deref().unwrap_or(""), term, LABEL);
    if !category.is_empty() {
        return category;
    }

    excerpt_around(&rule.title, term, LABEL)
}

/// Preview snippets for a matching rule.
///
/// Every body occurrence when the body matches; otherwise one snippet per
/// matching bullet; otherwise the single best excerpt.
#[must_use]
pub fn rule_search_excerpts(rule: &Rule, term: &str) -> Vec<String> {
    if term.trim().is_empty() {
        return Vec::new();
    }

    let body = excerpts_all(
        rule.body.as_deref().unwrap_or(""),
        term,
        BODY_MULTI,
        MAX_RULE_SNIPPETS,
    );
    if !body.is_empty() {
        return body;
    }

    let mut out: Vec<String> = Vec::new();
    for text in rule.bullet_texts() {
        for snippet in excerpts_all(text, term, BULLET_MULTI, 1) {
            if !out.contains(&snippet) {
                out.push(snippet);
            }
            if out.len() >= MAX_RULE_SNIPPETS {
                return out;
            }
        }
    }
    if !out.is_empty() {
        return out;
    }

    let single = rule_search_excerpt(rule, term);
    if single.is_empty() {
        Vec::new()
    } else {
        vec![single]
    }
}
