//! Split text into plain and matched segments.

use serde::Serialize;

use crate::needle::Needle;

/// A run of text, flagged when it is an occurrence of the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

impl<'a> Segment<'a> {
    const fn plain(text: &'a str) -> Self {
        Self {
            text,
            matched: false,
        }
    }
}

/// Segment `text` around every case-insensitive occurrence of `term`.
///
/// The term is matched literally. A blank term yields the whole text as a
/// single plain segment; empty text yields no segments.
#[must_use]
pub fn highlight<'a>(text: &'a str, term: &str) -> Vec<Segment<'a>> {
    if text.is_empty() {
        return Vec::new();
    }
    let Some(needle) = Needle::new(term) else {
        return vec![Segment::plain(text)];
    };

    let mut out = Vec::new();
    let mut cursor = 0;
    for hit in needle.find_all(text, usize::MAX) {
        if hit.start > cursor {
            out.push(Segment::plain(&text[cursor..hit.start]));
        }
        out.push(Segment {
            text: &text[hit.clone()],
            matched: true,
        });
        cursor = hit.end;
    }
    if cursor < text.len() {
        out.push(Segment::plain(&text[cursor..]));
    }
    out
}

/// Join segments back into a string, wrapping matches in `open`/`close`.
#[must_use]
pub fn mark(segments: &[Segment<'_>], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.matched {
            out.push_str(open);
            out.push_str(segment.text);
            out.push_str(close);
        } else {
            out.push_str(segment.text);
        }
    }
    out
}

/// Whether any segment is a match.
#[must_use]
pub fn has_match(segments: &[Segment<'_>]) -> bool {
    segments.iter().any(|s| s.matched)
}
