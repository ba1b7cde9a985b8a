//! Plain-text extraction from verse markup
//!
//! The result mirrors what a browser reports as `textContent`: tags are
//! removed without inserting whitespace, script/style bodies and comments are
//! dropped, entities are decoded, and whitespace is left exactly as written.
//! Stored character offsets were captured against that text, so it must not
//! be collapsed or trimmed here.
//!
//! Elements the renderer generated itself (tagged with
//! [`UI_ATTRIBUTE`](crate::config::UI_ATTRIBUTE)) are dropped with their
//! content, so rendered markup extracts to the same text as its source.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::UI_ATTRIBUTE;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid comment regex"));

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("valid script regex")
});

static STYLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("valid style regex")
});

// generated elements only ever hold escaped text, never nested tags
static UI_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)<(?:span|button)\b[^>]*\s{}\b[^>]*>[^<]*</(?:span|button)\s*>",
        regex::escape(UI_ATTRIBUTE)
    );
    Regex::new(&pattern).expect("valid ui regex")
});

// A tag must open with a letter, `/`, `!` or `?` so a bare "<" in running
// text ("a < b") survives.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[A-Za-z/!?][^>]*>").expect("valid tag regex"));

/// Strip markup from a verse's source text.
///
/// Deterministic: the same input always yields the same string, so offsets
/// computed against it stay valid for the lifetime of that source.
pub fn extract_plain_text(source_markup: &str) -> String {
    if !source_markup.contains('<') && !source_markup.contains('&') {
        return source_markup.to_string();
    }

    let no_comments = COMMENT_RE.replace_all(source_markup, "");
    let no_script = SCRIPT_RE.replace_all(&no_comments, "");
    let no_style = STYLE_RE.replace_all(&no_script, "");
    let no_ui = UI_RE.replace_all(&no_style, "");
    let no_tags = TAG_RE.replace_all(&no_ui, "");

    html_escape::decode_html_entities(&no_tags).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_inline_markup() {
        let html = r#"In the <span class="wj">beginning</span> <b>God</b> created"#;
        assert_eq!(extract_plain_text(html), "In the beginning God created");
    }

    #[test]
    fn test_drops_script_style_and_comments() {
        let html = "<style>.x{}</style>Jesus<!-- note --> wept.<script>alert('x')</script>";
        assert_eq!(extract_plain_text(html), "Jesus wept.");
    }

    #[test]
    fn test_decodes_entities() {
        let html = "the LORD&#8217;s &amp; the people&nbsp;rejoiced";
        assert_eq!(
            extract_plain_text(html),
            "the LORD\u{2019}s & the people\u{a0}rejoiced"
        );
    }

    #[test]
    fn test_whitespace_preserved() {
        let html = "<p>  For God\n so loved </p>";
        assert_eq!(extract_plain_text(html), "  For God\n so loved ");
    }

    #[test]
    fn test_bare_angle_bracket_survives() {
        assert_eq!(extract_plain_text("1 < 2 and 3 > 2"), "1 < 2 and 3 > 2");
    }

    #[test]
    fn test_skips_generated_elements() {
        let html = concat!(
            r#"<span class="va-marker" data-va-ui>&#10013;</span>"#,
            r#"<span class="va-segment" data-start="0" data-end="5">Jesus</span>"#,
            r#"<span class="va-segment" data-start="5" data-end="10"> wept"#,
            r#"<button type="button" data-va-ui aria-label="Remove annotation">&times;</button></span>."#,
        );
        assert_eq!(extract_plain_text(html), "Jesus wept.");
    }

    #[test]
    fn test_idempotent_on_plain_text() {
        let plain = "And God said, Let there be light: and there was light.";
        let once = extract_plain_text(plain);
        assert_eq!(once, plain);
        assert_eq!(extract_plain_text(&once), once);

        let marked = extract_plain_text("<i>Blessed</i> are the meek");
        assert_eq!(extract_plain_text(&marked), marked);
    }
}
