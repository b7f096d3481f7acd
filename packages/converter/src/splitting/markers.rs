//! Enumeration markers used in statute text.

use regex::Regex;
use std::sync::LazyLock;

/// Lettered marker followed by whitespace, e.g. "(a) ".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTERED_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([a-z])\)\s").expect("valid regex"));

/// Numbered marker followed by whitespace, e.g. "(12) ".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((\d+)\)\s").expect("valid regex"));

/// Lettered marker anywhere, e.g. "(a)" in "subsection (a)of".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LETTERED_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([a-z]\)").expect("valid regex"));

/// Numbered marker anywhere.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static NUMBERED_ANYWHERE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\d+\)").expect("valid regex"));

/// Kind of enumeration marker.
///
/// Georgia statutes use (a), (b) for subsections, (1), (2) for paragraphs and
/// (A), (B) for subparagraphs. Subparagraph markers are not split on and stay
/// in the paragraph text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Single lowercase letter: "(a)".
    Lettered,

    /// One or more digits: "(1)".
    Numbered,
}

impl MarkerKind {
    /// Pattern of a marker that opens a new division: the marker followed by
    /// whitespace. Capture group 1 is the marker label.
    fn boundary(self) -> &'static Regex {
        match self {
            Self::Lettered => &LETTERED_BOUNDARY,
            Self::Numbered => &NUMBERED_BOUNDARY,
        }
    }

    /// Pattern of the marker wherever it occurs, used to find where text
    /// attributable to a division ends.
    fn anywhere(self) -> &'static Regex {
        match self {
            Self::Lettered => &LETTERED_ANYWHERE,
            Self::Numbered => &NUMBERED_ANYWHERE,
        }
    }

    /// Byte offset of the first marker of this kind, with or without
    /// trailing whitespace.
    #[must_use]
    pub fn find_first(self, text: &str) -> Option<usize> {
        self.anywhere().find(text).map(|m| m.start())
    }

    /// Split text before every boundary marker of this kind.
    ///
    /// Returns the text preceding the first marker and the marked segments in
    /// source order. Each segment keeps its label and the text that follows
    /// the marker up to the next boundary.
    #[must_use]
    pub fn split(self, text: &str) -> (&str, Vec<MarkedSegment<'_>>) {
        let markers: Vec<(usize, usize, &str)> = self
            .boundary()
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let label = caps.get(1)?;
                // The body starts right after the closing parenthesis.
                Some((whole.start(), label.end() + 1, label.as_str()))
            })
            .collect();

        let Some(&(first_start, _, _)) = markers.first() else {
            return (text, Vec::new());
        };

        let segments = markers
            .iter()
            .enumerate()
            .map(|(i, &(_, body_start, label))| {
                let end = markers.get(i + 1).map_or(text.len(), |next| next.0);
                MarkedSegment {
                    label,
                    body: &text[body_start..end],
                }
            })
            .collect();

        (&text[..first_start], segments)
    }
}

/// A piece of text opened by a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedSegment<'a> {
    /// Marker label without parentheses ("a", "12").
    pub label: &'a str,

    /// Text after the marker, up to the next marker of the same kind.
    pub body: &'a str,
}

/// Cut text at the first marker of any of the given kinds.
#[must_use]
pub fn cut_at_first_marker<'a>(text: &'a str, kinds: &[MarkerKind]) -> &'a str {
    let end = kinds
        .iter()
        .filter_map(|kind| kind.find_first(text))
        .min()
        .unwrap_or(text.len());
    &text[..end]
}
