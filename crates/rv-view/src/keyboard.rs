//! Keys the list reacts to and the header-level movement rules.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Down,
    Up,
    Home,
    End,
    Enter,
    Space,
    /// `/`: jump to the search field.
    Slash,
    /// Clear the search term.
    Escape,
}

/// What a key does to the header at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    /// Focus and expand the header at this position.
    MoveTo(usize),
    /// Open the header at this position with scroll-follow.
    Activate(usize),
}

/// Resolve a header key over a list of `len` items.
///
/// Movement clamps at both ends and never wraps. Returns `None` for an
/// empty list, an out-of-range `index`, and keys that are not header keys.
#[must_use]
pub fn header_action(key: Key, index: usize, len: usize) -> Option<HeaderAction> {
    if index >= len {
        return None;
    }
    let last = len - 1;
    let action = match key {
        Key::Down => HeaderAction::MoveTo((index + 1).min(last)),
        Key::Up => HeaderAction::MoveTo(index.saturating_sub(1)),
        Key::Home => HeaderAction::MoveTo(0),
        Key::End => HeaderAction::MoveTo(last),
        Key::Enter | Key::Space => HeaderAction::Activate(index),
        Key::Slash | Key::Escape => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Key::Down, 0, 3, Some(HeaderAction::MoveTo(1)))]
    #[case(Key::Down, 2, 3, Some(HeaderAction::MoveTo(2)))]
    #[case(Key::Up, 0, 3, Some(HeaderAction::MoveTo(0)))]
    #[case(Key::Up, 2, 3, Some(HeaderAction::MoveTo(1)))]
    #[case(Key::Home, 2, 3, Some(HeaderAction::MoveTo(0)))]
    #[case(Key::End, 0, 3, Some(HeaderAction::MoveTo(2)))]
    #[case(Key::Enter, 1, 3, Some(HeaderAction::Activate(1)))]
    #[case(Key::Space, 1, 3, Some(HeaderAction::Activate(1)))]
    #[case(Key::Slash, 1, 3, None)]
    #[case(Key::Down, 0, 0, None)]
    #[case(Key::Down, 5, 3, None)]
    fn header_keys(#[case] key: Key, #[case] index: usize, #[case] len: usize, #[case] expected: Option<HeaderAction>) {
        assert_eq!(header_action(key, index, len), expected);
    }
}
