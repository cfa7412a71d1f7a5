//! Lay a [`ListView`] out as terminal lines.

use std::collections::HashMap;

use rv_core::RecordId;
use rv_view::render::{MarkedText, RuleDetail, RuleListItem};
use rv_view::{ListStatus, ListView};

/// Lines taken by the in-flow search controls at the top of the page.
pub const CONTROLS_ROWS: usize = 2;

const INDENT: &str = "    ";

/// How matches are marked and how wide lines may get.
#[derive(Debug, Clone, Copy)]
pub struct PaintStyle {
    pub open: &'static str,
    pub close: &'static str,
    pub width: usize,
}

impl PaintStyle {
    #[must_use]
    pub fn new(color: bool, width: Option<usize>) -> Self {
        let (open, close) = if color {
            ("\u{1b}[1;33m", "\u{1b}[0m")
        } else {
            ("«", "»")
        };
        Self {
            open,
            close,
            width: width.unwrap_or(100).max(20),
        }
    }

    fn mark(&self, text: &MarkedText) -> String {
        text.to_marked(self.open, self.close)
    }
}

/// A painted page plus the positions scroll targets are measured from.
#[derive(Debug, Clone, Default)]
pub struct Painted {
    pub lines: Vec<String>,
    headers: HashMap<RecordId, usize>,
    first_marks: HashMap<RecordId, usize>,
}

impl Painted {
    #[must_use]
    pub fn header_line(&self, id: &RecordId) -> Option<usize> {
        self.headers.get(id).copied()
    }

    #[must_use]
    pub fn first_mark_line(&self, id: &RecordId) -> Option<usize> {
        self.first_marks.get(id).copied()
    }

    fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    fn push_marked(&mut self, id: &RecordId, text: &MarkedText, indent: &str, style: &PaintStyle) {
        let start = self.lines.len();
        for line in wrap(&style.mark(text), style.width.saturating_sub(indent.len()).max(10)) {
            self.lines.push(format!("{indent}{line}"));
        }
        if text.has_match() {
            self.first_marks.entry(id.clone()).or_insert(start);
        }
    }
}

/// Visible width, skipping ANSI escape sequences.
fn visible_width(value: &str) -> usize {
    let mut width = 0;
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

/// Greedy word wrap. Words longer than `width` get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && visible_width(&current) + 1 + visible_width(word) > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// One-line summary of the list state.
#[must_use]
pub fn status_line(list: &ListView) -> String {
    let position = list
        .search_position
        .map(|p| format!("  [{}/{}]", p.current, p.total))
        .unwrap_or_default();
    match &list.status {
        ListStatus::Loading => String::from("Loading rules..."),
        ListStatus::Empty { term } if term.is_empty() => String::from("No rules to show."),
        ListStatus::Empty { term } => {
            format!("No results for \"{term}\". Ask it: {}", list.ask_href)
        }
        ListStatus::Few { count } => {
            format!("{count} result(s){position}. Not what you need? Ask: {}", list.ask_href)
        }
        ListStatus::Results { count } => format!("{count} rule(s){position}"),
    }
}

fn header_line(item: &RuleListItem, style: &PaintStyle) -> String {
    let cursor = if item.focused { '>' } else { ' ' };
    let arrow = if item.expanded { '▾' } else { '▸' };
    let mut line = format!("{cursor}{arrow} {}", style.mark(&item.title));
    if let Some(category) = &item.category {
        line.push_str(&format!("  ({})", style.mark(category)));
    }
    line
}

/// Paint an expanded rule's content.
pub fn paint_detail(page: &mut Painted, id: &RecordId, detail: &RuleDetail, style: &PaintStyle) {
    for paragraph in &detail.paragraphs {
        page.push_marked(id, paragraph, INDENT, style);
    }
    for card in &detail.cards {
        if let Some(title) = &card.title {
            page.push_marked(id, title, "  ■ ", style);
        }
        for bullet in &card.bullets {
            page.push_marked(id, &bullet.text, "      • ", style);
            if !bullet.tags.is_empty() {
                let tags = bullet.tags.iter().map(|t| format!("#{t}")).collect::<Vec<_>>();
                page.push(format!("        {}", tags.join(" ")));
            }
        }
    }
}

/// Paint the controls line, the status line, and every row.
#[must_use]
pub fn paint(controls: &str, list: &ListView, style: &PaintStyle) -> Painted {
    let mut page = Painted::default();
    page.push(controls.to_string());
    page.push(status_line(list));
    if let Some(category) = &list.global_category {
        page.push(format!("  {category}"));
    }

    for item in &list.items {
        page.push(String::new());
        page.headers.insert(item.id.clone(), page.lines.len());
        page.push(header_line(item, style));
        for snippet in &item.summary {
            page.push_marked(&item.id, snippet, INDENT, style);
        }
        if let Some(detail) = &item.detail {
            paint_detail(&mut page, &item.id, detail, style);
        }
    }
    page
}


#[cfg(test)]
impl Painted {
    pub fn for_test(lines: Vec<String>, headers: &[(&str, usize)]) -> Self {
        Self {
            lines,
            headers: headers.iter().map(|(id, line)| (RecordId::from(*id), *line)).collect(),
            first_marks: HashMap::new(),
        }
    }
}
