/// Returns at most `max` characters of `value`.
///
/// Counts Unicode scalar values so multi-byte names are never split mid-character.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Lowercases a display name and replaces spaces with dashes for channel names.
pub fn channel_slug(value: &str) -> String {
    value.to_lowercase().replace(' ', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_chars("äöüß", 2), "äö");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }

    #[test]
    fn slugs_display_names() {
        assert_eq!(channel_slug("Big Tom"), "big-tom");
    }
}
