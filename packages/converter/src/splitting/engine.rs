//! Split engine that turns section text into subsection trees.

use super::config::{create_statute_hierarchy, MarkerHierarchy};
use super::markers::{cut_at_first_marker, MarkedSegment};
use crate::config::MAX_SUBSECTION_TEXT;
use crate::text::truncate_chars;
use crate::types::SubsectionNode;

/// Result of splitting a section body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitBody {
    /// Text before the first subsection marker, trimmed. Holds the whole
    /// body when no subsection marker exists.
    pub intro: String,

    /// Subsections in source order; empty for flat sections.
    pub subsections: Vec<SubsectionNode>,
}

impl SplitBody {
    /// Whether the body has no recognized subsections.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.subsections.is_empty()
    }
}

/// Engine for splitting section text using a marker hierarchy.
///
/// Lenient by construction: malformed or out-of-order markers never cause an
/// error, they can only cause text to be attributed to the wrong division.
pub struct SplitEngine {
    hierarchy: MarkerHierarchy,
    max_text: usize,
}

impl SplitEngine {
    /// Create a new split engine.
    #[must_use]
    pub fn new(hierarchy: MarkerHierarchy) -> Self {
        Self {
            hierarchy,
            max_text: MAX_SUBSECTION_TEXT,
        }
    }

    /// Override the maximum number of characters kept per division.
    #[cfg(test)]
    #[must_use]
    pub fn with_max_text(mut self, max_text: usize) -> Self {
        self.max_text = max_text;
        self
    }

    /// Split a normalized section body into intro text and subsections.
    #[must_use]
    pub fn split(&self, text: &str) -> SplitBody {
        let Some(kind) = self.hierarchy.level(0) else {
            return SplitBody {
                intro: text.trim().to_string(),
                subsections: Vec::new(),
            };
        };

        let (intro, segments) = kind.split(text);
        SplitBody {
            intro: intro.trim().to_string(),
            subsections: self.build_nodes(&segments, 0),
        }
    }

    /// Build nodes for the segments found at a depth.
    fn build_nodes(&self, segments: &[MarkedSegment<'_>], depth: usize) -> Vec<SubsectionNode> {
        segments
            .iter()
            .map(|segment| self.build_node(segment, depth))
            .collect()
    }

    fn build_node(&self, segment: &MarkedSegment<'_>, depth: usize) -> SubsectionNode {
        let body = segment.body.trim();

        let Some(child_kind) = self.hierarchy.level(depth + 1) else {
            // Leaf: stop at the next marker of any level so text never bleeds
            // into a sibling or the next subsection.
            let text = cut_at_first_marker(body, self.hierarchy.kinds()).trim();
            return SubsectionNode::new(segment.label, truncate_chars(text, self.max_text));
        };

        let (direct, children) = match child_kind.find_first(body) {
            Some(pos) => {
                let (_, child_segments) = child_kind.split(&body[pos..]);
                (
                    body[..pos].trim(),
                    self.build_nodes(&child_segments, depth + 1),
                )
            }
            None => (body, Vec::new()),
        };

        // Guard against a same-level marker quoted inside the division text.
        let own_kind = self.hierarchy.kinds().get(depth).copied();
        let direct = own_kind
            .map_or(direct, |kind| cut_at_first_marker(direct, &[kind]))
            .trim();

        SubsectionNode::new(segment.label, truncate_chars(direct, self.max_text))
            .with_children(children)
    }
}

impl Default for SplitEngine {
    fn default() -> Self {
        Self::new(create_statute_hierarchy())
    }
}

/// Split a normalized section body with the statute hierarchy.
///
/// # Examples
/// ```
/// use ocga_akn::splitting::parse_subsections;
///
/// let body = parse_subsections("(a) First. (1) One. (2) Two. (b) Second.");
/// assert_eq!(body.subsections.len(), 2);
/// assert_eq!(body.subsections[0].children[1].text, "Two.");
/// assert_eq!(body.subsections[1].text, "Second.");
/// ```
#[must_use]
pub fn parse_subsections(text: &str) -> SplitBody {
    SplitEngine::default().split(text)
}
