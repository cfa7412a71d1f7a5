//! Link targets that are rendered but never fetched.

/// The "submit a question" link, carrying the current search term.
#[must_use]
pub fn ask_href(ask_path: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return ask_path.to_string();
    }
    format!("{ask_path}?q={}", urlencoding::encode(term))
}
