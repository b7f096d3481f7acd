//! Plain-text normalization of escaped archive content.
//!
//! Section content in the archive is HTML that was entity-escaped once more
//! before being stored in XML. After the XML parser has removed the outer
//! layer, [`clean_html_content`] decodes the HTML entities and strips the
//! presentational tags, leaving plain text with normalized line breaks.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// HTML character reference: named, decimal or hexadecimal. The closing
/// semicolon is optional; legacy markup often leaves it out.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ENTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*)(;?)").expect("valid regex")
});

/// Named references that HTML still recognizes without a closing semicolon.
const LEGACY_ENTITIES: &[&str] = &[
    "AElig", "AMP", "Aacute", "Acirc", "Agrave", "Aring", "Atilde", "Auml", "COPY", "Ccedil",
    "ETH", "Eacute", "Ecirc", "Egrave", "Euml", "GT", "Iacute", "Icirc", "Igrave", "Iuml", "LT",
    "Ntilde", "Oacute", "Ocirc", "Ograve", "Oslash", "Otilde", "Ouml", "QUOT", "REG", "THORN",
    "Uacute", "Ucirc", "Ugrave", "Uuml", "Yacute", "aacute", "acirc", "acute", "aelig", "agrave",
    "amp", "aring", "atilde", "auml", "brvbar", "ccedil", "cedil", "cent", "copy", "curren",
    "deg", "divide", "eacute", "ecirc", "egrave", "eth", "euml", "frac12", "frac14", "frac34",
    "gt", "iacute", "icirc", "iexcl", "igrave", "iquest", "iuml", "laquo", "lt", "macr", "micro",
    "middot", "nbsp", "not", "ntilde", "oacute", "ocirc", "ograve", "ordf", "ordm", "oslash",
    "otilde", "ouml", "para", "plusmn", "pound", "quot", "raquo", "reg", "sect", "shy", "sup1",
    "sup2", "sup3", "szlig", "thorn", "times", "uacute", "ucirc", "ugrave", "uml", "uuml",
    "yacute", "yen", "yuml",
];

/// Line break tag in any of its spellings (`<BR>`, `<br/>`, `<BR />`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAK_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<BR\s*/?>").expect("valid regex"));

/// Paragraph open tag, with or without attributes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PARAGRAPH_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<P(?:\s[^>]*)?>").expect("valid regex"));

/// Presentational tags that are dropped without leaving a trace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DROPPED_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</P\s*>|</?(?:B|STRONG)\s*>|<FONT(?:\s[^>]*)?>|</FONT\s*>")
        .expect("valid regex")
});

/// Anything left that looks like a tag.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Two or more line breaks with only whitespace between them.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n+").expect("valid regex"));

/// Windows-1252 characters for the numeric references 0x80..=0x9F,
/// which legacy HTML uses instead of the C1 control characters.
const WINDOWS_1252_C1: [char; 32] = [
    '\u{20AC}', '\u{81}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{8D}', '\u{017D}', '\u{8F}',
    '\u{90}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{9D}', '\u{017E}', '\u{0178}',
];

/// Resolve a numeric character reference to the text it stands for.
///
/// Out-of-range values and surrogates become U+FFFD; control characters that
/// cannot appear in XML output are dropped.
fn resolve_numeric_reference(value: u32) -> String {
    if (0x80..=0x9F).contains(&value) {
        return WINDOWS_1252_C1[(value - 0x80) as usize].to_string();
    }
    match char::from_u32(value) {
        None | Some('\0') => '\u{FFFD}'.to_string(),
        Some(c) if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => String::new(),
        Some(c) => c.to_string(),
    }
}

/// Resolve a named reference written without its semicolon.
///
/// Only legacy names qualify. The longest legacy prefix wins and the rest of
/// the name stays as text, so `&notin` reads as `¬in`.
fn resolve_legacy_reference(name: &str) -> Option<String> {
    (1..=name.len()).rev().find_map(|end| {
        let prefix = &name[..end];
        if !LEGACY_ENTITIES.contains(&prefix) {
            return None;
        }
        quick_xml::escape::resolve_predefined_entity(prefix)
            .map(|decoded| format!("{decoded}{}", &name[end..]))
    })
}

/// Decode HTML character references.
///
/// Named references resolve against the HTML5 entity table; unknown names
/// and malformed references are kept as literal text. Numeric references and
/// the legacy names (`&nbsp`, `&sect`, `&amp`) decode without a semicolon too.
///
/// # Examples
/// ```
/// use ocga_akn::text::decode_entities;
///
/// assert_eq!(decode_entities("a &amp; b"), "a & b");
/// assert_eq!(decode_entities("&sect;&nbsp;1"), "\u{a7}\u{a0}1");
/// assert_eq!(decode_entities("&bogus; &#x41;"), "&bogus; A");
/// assert_eq!(decode_entities("&sect 5"), "\u{a7} 5");
/// ```
#[must_use]
pub fn decode_entities(text: &str) -> String {
    ENTITY_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let whole = &caps[0];
            let reference = &caps[1];
            let terminated = !caps[2].is_empty();

            if let Some(hex) = reference
                .strip_prefix("#x")
                .or_else(|| reference.strip_prefix("#X"))
            {
                return u32::from_str_radix(hex, 16)
                    .map_or_else(|_| '\u{FFFD}'.to_string(), resolve_numeric_reference);
            }
            if let Some(decimal) = reference.strip_prefix('#') {
                return decimal
                    .parse::<u32>()
                    .map_or_else(|_| '\u{FFFD}'.to_string(), resolve_numeric_reference);
            }

            let decoded = if terminated {
                quick_xml::escape::resolve_predefined_entity(reference).map(str::to_string)
            } else {
                resolve_legacy_reference(reference)
            };
            decoded.unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
}

/// Extract plain text from HTML-escaped section content.
///
/// Entities are decoded first so entity-encoded tags are caught too. Line
/// breaks and paragraph openings become newlines, the other whitelisted tags
/// are removed, and any other tag is removed as well (its content is lost).
/// Blank-line runs collapse to a single blank line. Never fails.
///
/// Exactly one layer of entities is decoded. Cleaning is idempotent only when
/// the decoded text holds no further entity or tag markup: input escaped
/// twice (`&amp;lt;B&amp;gt;`) comes out as `&lt;B&gt;` on the first call,
/// and a second call decodes that into a tag and strips it.
///
/// # Examples
/// ```
/// use ocga_akn::text::clean_html_content;
///
/// let raw = "&lt;P&gt;&lt;B&gt;(a)&lt;/B&gt; Means this.&lt;/P&gt;";
/// assert_eq!(clean_html_content(raw), "(a) Means this.");
/// ```
#[must_use]
pub fn clean_html_content(html: &str) -> String {
    let text = decode_entities(html);
    let text = LINE_BREAK_TAG.replace_all(&text, "\n");
    let text = PARAGRAPH_TAG.replace_all(&text, "\n");
    let text = DROPPED_TAGS.replace_all(&text, "");
    let text = ANY_TAG.replace_all(&text, "");
    let text = BLANK_LINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Truncate text to at most `max_chars` characters.
///
/// Counts characters rather than bytes so multi-byte text is never split
/// inside a code point.
///
/// # Examples
/// ```
/// use ocga_akn::text::truncate_chars;
///
/// assert_eq!(truncate_chars("§§§§", 2), "§§");
/// assert_eq!(truncate_chars("short", 100), "short");
/// ```
#[must_use]
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("&lt;P&gt;"), "<P>");
        assert_eq!(decode_entities("&quot;term&quot;"), "\"term\"");
        assert_eq!(decode_entities("&mdash;"), "\u{2014}");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("&#167;"), "\u{a7}");
        assert_eq!(decode_entities("&#xA7;"), "\u{a7}");
        // Legacy Windows-1252 quotes
        assert_eq!(decode_entities("&#147;x&#148;"), "\u{201C}x\u{201D}");
    }

    #[test]
    fn test_decode_degrades_gracefully() {
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&nosuchentity;"), "&nosuchentity;");
        assert_eq!(decode_entities("&#0;"), "\u{FFFD}");
        assert_eq!(decode_entities("&#99999999999;"), "\u{FFFD}");
        assert_eq!(decode_entities("a&#1;b"), "ab");
    }

    #[test]
    fn test_decode_without_semicolon() {
        assert_eq!(decode_entities("&sect 5 &nbsp"), "\u{a7} 5 \u{a0}");
        assert_eq!(decode_entities("&ltB&gt"), "<B>");
        assert_eq!(decode_entities("&#167 2"), "\u{a7} 2");
        assert_eq!(decode_entities("&copy2018"), "\u{a9}2018");
        // Longest legacy prefix, remainder kept
        assert_eq!(decode_entities("&notin"), "\u{ac}in");
        // Only legacy names decode without the semicolon
        assert_eq!(decode_entities("&mdash x"), "&mdash x");
    }

    #[test]
    fn test_clean_line_breaks_and_paragraphs() {
        let raw = "Line one&lt;BR&gt;Line two&lt;br /&gt;Line three";
        assert_eq!(clean_html_content(raw), "Line one\nLine two\nLine three");

        let raw = "&lt;P&gt;First.&lt;/P&gt;&lt;P class=\"x\"&gt;Second.&lt;/P&gt;";
        assert_eq!(clean_html_content(raw), "First.\nSecond.");
    }

    #[test]
    fn test_clean_drops_presentational_tags() {
        let raw = "&lt;STRONG&gt;Bold&lt;/STRONG&gt; &lt;b&gt;b&lt;/b&gt; \
                   &lt;FONT face=\"Arial\" size=\"2\"&gt;font&lt;/FONT&gt;";
        assert_eq!(clean_html_content(raw), "Bold b font");
    }

    #[test]
    fn test_clean_drops_unknown_tags() {
        let raw = "See &lt;A HREF=\"#x\"&gt;Code Section 1-1-1&lt;/A&gt;.";
        assert_eq!(clean_html_content(raw), "See Code Section 1-1-1.");
    }

    #[test]
    fn test_clean_collapses_blank_lines() {
        let raw = "&lt;P&gt;One&lt;/P&gt;&lt;P&gt;&lt;/P&gt;&lt;P&gt;&lt;/P&gt;  \n&lt;P&gt;Two";
        assert_eq!(clean_html_content(raw), "One\n\nTwo");
    }

    #[test]
    fn test_clean_output_has_no_tags() {
        let raw = "&lt;P&gt;&lt;FONT color=red&gt;(a)&lt;/FONT&gt; &lt;B&gt;x&lt;/B&gt;\
                   &lt;BR&gt;&lt;STRONG&gt;y&lt;/STRONG&gt;&lt;/P&gt;";
        let cleaned = clean_html_content(raw);
        assert!(!ANY_TAG.is_match(&cleaned), "tags left in {cleaned:?}");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "&lt;P&gt;(a) One.&lt;BR&gt;&lt;BR&gt;&lt;BR&gt;(b) Two.&lt;/P&gt;",
            "  plain text with &amp; an ampersand  ",
            "&lt;P&gt;&lt;/P&gt;\n\n\n&lt;B&gt;Heading&lt;/B&gt;\n \n text",
            "",
        ];
        for input in inputs {
            let once = clean_html_content(input);
            assert_eq!(clean_html_content(&once), once, "input: {input:?}");
        }
    }

    #[test]
    fn test_clean_decodes_one_layer_of_double_escaping() {
        let once = clean_html_content("a &amp;lt;B&amp;gt;b");
        assert_eq!(once, "a &lt;B&gt;b");
        // The remaining layer is markup on the next call
        assert_eq!(clean_html_content(&once), "a b");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("abc", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
        assert_eq!(truncate_chars("\u{a7}\u{a7}\u{a7}", 1), "\u{a7}");
    }
}
