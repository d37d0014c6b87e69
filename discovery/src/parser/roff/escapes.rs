//! Roff escape sequence handling.

/// Replaces every escaped hyphen (`\-`) with a plain `-`.
///
/// Manual pages spell option dashes as `\-` so the formatter does not turn
/// them into typographic hyphens. No other escape is touched.
pub fn normalize_hyphens(input: &str) -> String {
    input.replace("\\-", "-")
}

/// Removes any run of `"` characters from both ends.
pub fn strip_outer_quotes(input: &str) -> &str {
    input.trim_matches('"')
}

/// Returns the first whitespace-delimited word, if any.
pub fn first_word(input: &str) -> Option<&str> {
    input.split_whitespace().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hyphens_only_touches_escaped_dashes() {
        assert_eq!(normalize_hyphens("\\-\\-no\\-control"), "--no-control");
        assert_eq!(normalize_hyphens("\\fB\\-f\\fR"), "\\fB-f\\fR");
        assert_eq!(normalize_hyphens("path\\ with\\ space"), "path\\ with\\ space");
    }

    #[test]
    fn test_strip_outer_quotes_keeps_inner_quotes() {
        assert_eq!(strip_outer_quotes("\"-f, --fullscreen\""), "-f, --fullscreen");
        assert_eq!(strip_outer_quotes("\"\"a\"b\"\""), "a\"b");
        assert_eq!(strip_outer_quotes("plain"), "plain");
    }

    #[test]
    fn test_first_word() {
        assert_eq!(first_word("--record file.mp4"), Some("--record"));
        assert_eq!(first_word("   "), None);
    }
}
