//! Case-insensitive literal matching.
//!
//! Offsets are byte offsets into the original haystack so callers can
//! slice it directly, even when lowercasing changes a character's width.

use std::ops::Range;

/// A trimmed, lowercased search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle {
    chars: Vec<char>,
}

impl Needle {
    /// `None` for blank terms.
    #[must_use]
    pub fn new(term: &str) -> Option<Self> {
        let chars: Vec<char> = term.trim().chars().flat_map(char::to_lowercase).collect();
        (!chars.is_empty()).then_some(Self { chars })
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    #[must_use]
    pub fn is_in(&self, haystack: &str) -> bool {
        self.find(haystack, 0).is_some()
    }

    /// First occurrence at or after byte offset `from`.
    #[must_use]
    pub fn find(&self, haystack: &str, from: usize) -> Option<Range<usize>> {
        let tail = haystack.get(from..)?;
        tail.char_indices()
            .map(|(offset, _)| from + offset)
            .find_map(|start| self.match_at(haystack, start).map(|end| start..end))
    }

    /// All non-overlapping occurrences, up to `limit`.
    #[must_use]
    pub fn find_all(&self, haystack: &str, limit: usize) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut from = 0;
        while out.len() < limit {
            let Some(range) = self.find(haystack, from) else {
                break;
            };
            from = range.end;
            out.push(range);
        }
        out
    }

    fn match_at(&self, haystack: &str, start: usize) -> Option<usize> {
        let mut expected = self.chars.iter();
        let mut next = expected.next();
        for (offset, ch) in haystack[start..].char_indices() {
            for lower in ch.to_lowercase() {
                match next {
                    Some(&want) if want == lower => next = expected.next(),
                    Some(_) => return None,
                    None => break,
                }
            }
            if next.is_none() {
                return Some(start + offset + ch.len_utf8());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn blank_terms_have_no_needle() {
        assert!(Needle::new("   ").is_none());
        assert!(Needle::new("").is_none());
    }

    #[test]
    fn finds_case_insensitively() {
        let needle = Needle::new("HandOver").unwrap();
        let hay = "Shift handover rules";
        assert_eq!(needle.find(hay, 0), Some(6..14));
        assert_eq!(&hay[6..14], "handover");
    }

    #[test]
    fn offsets_respect_multibyte_chars() {
        let needle = Needle::new("plantão").unwrap();
        let hay = "Passagem de PLANTÃO às 7h";
        let range = needle.find(hay, 0).unwrap();
        assert_eq!(&hay[range], "PLANTÃO");
    }

    #[test]
    fn find_all_is_non_overlapping() {
        let needle = Needle::new("aa").unwrap();
        assert_eq!(needle.find_all("aaaa", 10), vec![0..2, 2..4]);
        assert_eq!(needle.find_all("aaaa", 1), vec![0..2]);
    }

    #[test]
    fn find_from_out_of_range_is_none() {
        let needle = Needle::new("a").unwrap();
        assert_eq!(needle.find("abc", 10), None);
    }
}
