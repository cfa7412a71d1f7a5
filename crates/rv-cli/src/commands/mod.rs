pub mod ask;
pub mod browse;
pub mod config;
pub mod dispatch;
pub mod policies;
pub mod rules;
pub mod show;

/// Compute effective limit with precedence: global flag -> configured default.
#[must_use]
pub fn effective_limit(global: Option<u32>, fallback: u32) -> usize {
    usize::try_from(global.unwrap_or(fallback)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::effective_limit;

    #[test]
    fn flag_takes_precedence() {
        assert_eq!(effective_limit(Some(5), 50), 5);
    }

    #[test]
    fn fallback_used_when_flag_missing() {
        assert_eq!(effective_limit(None, 50), 50);
    }
}
