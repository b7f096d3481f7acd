//! Marker hierarchy for Georgia statute text.

use super::markers::MarkerKind;

/// Ordered marker kinds, outermost first.
///
/// Depth 0 of the hierarchy produces subsections, depth 1 paragraphs. The
/// deepest level produces leaves whose text is cut at any marker of the
/// hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerHierarchy {
    levels: Vec<MarkerKind>,
}

impl MarkerHierarchy {
    /// Create a hierarchy from outermost to innermost marker kind.
    #[must_use]
    pub fn new(levels: impl IntoIterator<Item = MarkerKind>) -> Self {
        Self {
            levels: levels.into_iter().collect(),
        }
    }

    /// Marker kind at a depth, if the hierarchy goes that deep.
    #[must_use]
    pub fn level(&self, depth: usize) -> Option<MarkerKind> {
        self.levels.get(depth).copied()
    }

    /// All marker kinds of the hierarchy.
    #[must_use]
    pub fn kinds(&self) -> &[MarkerKind] {
        &self.levels
    }
}

/// Create the hierarchy used for OCGA sections.
///
/// ```text
/// section
/// └── (a) subsection
///     └── (1) paragraph
///         └── (A) subparagraph   kept inline in the paragraph text
/// ```
#[must_use]
pub fn create_statute_hierarchy() -> MarkerHierarchy {
    MarkerHierarchy::new([MarkerKind::Lettered, MarkerKind::Numbered])
}
