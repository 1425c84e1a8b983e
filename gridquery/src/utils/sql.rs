//! SQL utility functions

/// Escape SQL LIKE metacharacters (%, _, \) in user input
///
/// Use this when building LIKE patterns from user input so the text is
/// matched literally. Patterns built this way must be used with `ESCAPE '\'`.
///
/// # Example
///
/// ```
/// use gridquery::utils::sql::escape_like_pattern;
///
/// let pattern = format!("%{}%", escape_like_pattern("100% match_test"));
/// assert_eq!(pattern, "%100\\% match\\_test%");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern_plain_text() {
        assert_eq!(escape_like_pattern("Bob"), "Bob");
        assert_eq!(escape_like_pattern(""), "");
    }

    #[test]
    fn test_escape_like_pattern_metacharacters() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("foo_bar"), "foo\\_bar");
        assert_eq!(escape_like_pattern("path\\file"), "path\\\\file");
    }

    #[test]
    fn test_escape_like_pattern_backslash_first() {
        assert_eq!(escape_like_pattern("100%_\\test"), "100\\%\\_\\\\test");
    }
}
