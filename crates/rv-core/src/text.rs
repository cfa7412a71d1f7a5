//! Pure text helpers shared by the renderer and the search layer.

/// Rendered in place of a rule that has neither body nor bullet text.
pub const NO_CONTENT: &str = "(no content)";

/// Separator used when a rule's bullets stand in for its body.
pub const BULLET_SEPARATOR: &str = " • ";

/// Trim `value` and return it only if something is left.
#[must_use]
pub fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Replace HTML tags with single spaces.
///
/// Policy answers are authored as HTML fragments; matching runs over the
/// plain text only. A tag is `<`, at least one character, then `>`; a `<`
/// without a closing `>` and an empty `<>` are kept as text.
#[must_use]
pub fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                out.push(' ');
                rest = &after[close + 1..];
            }
            _ => {
                out.push('<');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Split free text into paragraphs on blank lines.
#[must_use]
pub fn paragraphs(value: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in value.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                out.push(value[s..end].trim());
            }
        } else {
            start.get_or_insert(line_start);
            end = offset;
        }
    }
    if let Some(s) = start {
        out.push(value[s..end].trim());
    }
    out
}

/// Truncate to `max_chars` characters, appending `…` when cut.
#[must_use]
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    match value.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &value[..idx]),
        None => value.to_string(),
    }
}
