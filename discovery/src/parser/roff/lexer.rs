//! Line matcher for option-bearing roff directives.

use std::sync::LazyLock;

use regex::Regex;
use scrcpy_form_core::DirectiveKind;

use super::escapes::normalize_hyphens;

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\.(B|BI)\s+(.*)").expect("static regex must compile"));
static LEADING_QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^"([^"]+)""#).expect("static regex must compile"));

/// A `.B` or `.BI` line with its content hyphen-normalized and trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub kind: DirectiveKind,
    pub content: String,
}

/// Matches a single source line against the `.B` / `.BI` directive forms.
///
/// The macro must start the line and be followed by at least one whitespace
/// character, so `.BR`, `.BIR` and a bare `.B` never match.
pub fn parse_directive(line: &str) -> Option<Directive> {
    let captures = DIRECTIVE_RE.captures(line)?;
    let kind = DirectiveKind::from_macro(captures.get(1)?.as_str())?;
    let raw = captures.get(2).map_or("", |m| m.as_str());
    Some(Directive {
        kind,
        content: normalize_hyphens(raw).trim().to_string(),
    })
}

/// Returns the non-empty double-quoted segment that opens `content`.
pub fn leading_quoted_segment(content: &str) -> Option<&str> {
    LEADING_QUOTED_RE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive_distinguishes_b_and_bi() {
        let flag = parse_directive(".B \\-f, \\-\\-fullscreen").expect("flag directive");
        assert_eq!(flag.kind, DirectiveKind::Flag);
        assert_eq!(flag.content, "-f, --fullscreen");

        let value = parse_directive(".BI \"\\-b \" bit\\-rate").expect("value directive");
        assert_eq!(value.kind, DirectiveKind::Value);
        assert_eq!(value.content, "\"-b \" bit-rate");
    }

    #[test]
    fn test_parse_directive_rejects_other_macros() {
        assert!(parse_directive(".BR scrcpy (1)").is_none());
        assert!(parse_directive(".TP").is_none());
        assert!(parse_directive(".B").is_none());
        assert!(parse_directive(" .B --indented").is_none());
        assert!(parse_directive("B --no-dot").is_none());
    }

    #[test]
    fn test_parse_directive_allows_empty_content() {
        let directive = parse_directive(".B   ").expect("directive with blank content");
        assert_eq!(directive.content, "");
    }

    #[test]
    fn test_leading_quoted_segment_requires_opening_quote() {
        assert_eq!(
            leading_quoted_segment("\"--crop, value\" rest"),
            Some("--crop, value")
        );
        assert_eq!(leading_quoted_segment("--crop \"value\""), None);
        assert_eq!(leading_quoted_segment("\"\" empty"), None);
    }
}
