//! PII sanitizer — masks or strips emails, URLs, and phone-like digit runs
//! before any text leaves the pipeline or enters matching.
//!
//! One regex pipeline, two policies:
//! - `Mask` keeps labeled placeholders (`[EMAIL]`, `[URL]`, …) for display.
//! - `Strip` blanks emails/URLs and normalizes bullet glyphs for matching.
//!
//! Both policies are idempotent: placeholders contain no digits, so a second
//! pass matches nothing.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap());
static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://\S+|\bwww\.\S+").unwrap());
/// 7+ consecutive digits — IDs and full phone numbers. Applied before
/// `PHONE_RE` so long runs are not re-matched as phone fragments.
static LONG_NUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d{7,}\b").unwrap());
static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{2,4}\)?[-.\s]?){1,4}\d{2,4}").unwrap()
});
static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[•\-—–]+").unwrap());
static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());

/// How matched PII is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Redact for display: every pattern becomes a labeled placeholder.
    Mask,
    /// Prepare for matching: emails/URLs removed, digit runs placeheld,
    /// bullet and dash glyphs normalized to spaces.
    Strip,
}

/// Sanitizes `text` under the given policy.
///
/// Order matters: emails and URLs first (they may contain digit runs), then
/// long digit runs, then the looser phone heuristic. Whitespace within lines
/// is collapsed and the result trimmed; line breaks are preserved so callers
/// can still reason about resume lines.
pub fn sanitize(text: &str, policy: Policy) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let t = match policy {
        Policy::Mask => {
            let t = EMAIL_RE.replace_all(text, "[EMAIL]");
            let t = URL_RE.replace_all(&t, "[URL]");
            let t = LONG_NUM_RE.replace_all(&t, "[NUMBER]");
            PHONE_RE.replace_all(&t, "[PHONE]").into_owned()
        }
        Policy::Strip => {
            let t = EMAIL_RE.replace_all(text, " ");
            let t = URL_RE.replace_all(&t, " ");
            let t = LONG_NUM_RE.replace_all(&t, " [NUMBER] ");
            let t = PHONE_RE.replace_all(&t, " [PHONE] ");
            BULLET_RE.replace_all(&t, " ").into_owned()
        }
    };

    collapse_whitespace(&t)
}

/// Collapses runs of spaces/tabs and blank lines, trimming each line.
fn collapse_whitespace(text: &str) -> String {
    let collapsed = WS_RE.replace_all(text, " ");
    let collapsed = BLANK_LINE_RE.replace_all(&collapsed, "\n");
    collapsed
        .lines()
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_replaces_email_with_placeholder() {
        let out = sanitize("Contact: user@example.com for details", Policy::Mask);
        assert!(out.contains("[EMAIL]"));
        assert!(!out.contains("user@example.com"));
    }

    #[test]
    fn test_mask_replaces_url() {
        let out = sanitize("See https://example.com/profile and www.other.org", Policy::Mask);
        assert!(out.contains("[URL]"));
        assert!(!out.contains("example.com"));
    }

    #[test]
    fn test_strip_removes_email_entirely() {
        let out = sanitize("Reach me at user@example.com today", Policy::Strip);
        assert!(!out.contains("@"));
        assert!(!out.contains("[EMAIL]"));
    }

    #[test]
    fn test_long_digit_run_becomes_number_not_phone() {
        let out = sanitize("ID 123456789 on file", Policy::Strip);
        assert!(out.contains("[NUMBER]"));
        assert!(!out.contains("123456789"));
    }

    #[test]
    fn test_phone_pattern_masked() {
        let out = sanitize("Call 555-123-4567 anytime", Policy::Mask);
        assert!(out.contains("[PHONE]"));
        assert!(!out.contains("4567"));
    }

    #[test]
    fn test_strip_normalizes_bullet_glyphs() {
        let out = sanitize("• Built pipelines — fast", Policy::Strip);
        assert!(!out.contains('•'));
        assert!(!out.contains('—'));
    }

    #[test]
    fn test_strip_is_idempotent() {
        let input = "Email a@b.com, call 555-123-4567, ID 99887766. • Did things\n\n\nNext line";
        let once = sanitize(input, Policy::Strip);
        let twice = sanitize(&once, Policy::Strip);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_is_idempotent() {
        let input = "user@example.com https://x.dev 12345678 555-123-4567";
        let once = sanitize(input, Policy::Mask);
        let twice = sanitize(&once, Policy::Mask);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        let out = sanitize("  a    b\t\tc  ", Policy::Strip);
        assert_eq!(out, "a b c");
    }

    #[test]
    fn test_empty_input_yields_empty() {
        assert_eq!(sanitize("", Policy::Mask), "");
        assert_eq!(sanitize("   \n  ", Policy::Strip), "");
    }

    #[test]
    fn test_line_breaks_preserved() {
        let out = sanitize("First project line\nSecond project line", Policy::Strip);
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_percentages_survive_sanitization() {
        let out = sanitize("improved CTR by 12%", Policy::Strip);
        assert!(out.contains("12%"));
    }
}
