//! Core data types for the converter.
//!
//! These types represent Georgia statutes as read from the archive
//! ([`SourceEntry`]) and after extraction ([`SectionRecord`],
//! [`SubsectionNode`]).

/// One index entry of the archive that may hold a statute.
///
/// All fields are raw: caption, description and history are untrimmed and the
/// content is still HTML-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Nesting level attribute ("3" or "4" for sections).
    pub level: String,

    /// Caption, e.g. "48-1-2".
    pub caption: Option<String>,

    /// Description, used as the section heading.
    pub description: Option<String>,

    /// HTML-escaped section content.
    pub content: Option<String>,

    /// Revision history text.
    pub revision_history: Option<String>,
}

/// A subsection or paragraph recovered from section text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsectionNode {
    /// Marker label: a lowercase letter for subsections, digits for paragraphs.
    pub identifier: String,

    /// Text before the first child marker.
    pub text: String,

    /// Child divisions in source order.
    pub children: Vec<SubsectionNode>,
}

impl SubsectionNode {
    /// Create a node without children.
    #[must_use]
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }

    /// Attach child divisions.
    #[must_use]
    pub fn with_children(mut self, children: Vec<SubsectionNode>) -> Self {
        self.children = children;
        self
    }
}

/// A statute section extracted from the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRecord {
    /// Section number, e.g. "48-1-2" or "48-7-40.1".
    pub section_number: String,

    /// Chapter key: the second dash-delimited part of the section number.
    pub chapter: String,

    /// Heading of the chapter, when the archive declares one.
    pub chapter_title: Option<String>,

    /// Section heading.
    pub title: String,

    /// Normalized plain-text body.
    pub text: String,

    /// Intro text before the first subsection marker.
    pub intro: String,

    /// Revision history note.
    pub history: String,

    /// Subsections in source order.
    pub subsections: Vec<SubsectionNode>,
}

impl SectionRecord {
    /// Create a section with no heading, history or subsections.
    #[must_use]
    pub fn new(section_number: impl Into<String>, text: impl Into<String>) -> Self {
        let section_number = section_number.into();
        let chapter = chapter_of(&section_number).to_string();
        let text = text.into();
        Self {
            section_number,
            chapter,
            chapter_title: None,
            title: String::new(),
            intro: text.clone(),
            text,
            history: String::new(),
            subsections: Vec::new(),
        }
    }

    /// Set the section heading.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the history note.
    #[must_use]
    pub fn with_history(mut self, history: impl Into<String>) -> Self {
        self.history = history.into();
        self
    }

    /// Set the intro text and subsections.
    #[must_use]
    pub fn with_subsections(mut self, intro: impl Into<String>, subsections: Vec<SubsectionNode>) -> Self {
        self.intro = intro.into();
        self.subsections = subsections;
        self
    }

    /// Set the chapter heading.
    #[must_use]
    pub fn with_chapter_title(mut self, chapter_title: impl Into<String>) -> Self {
        self.chapter_title = Some(chapter_title.into());
        self
    }
}

/// Chapter key of a section number: its second dash-delimited part.
///
/// # Examples
/// ```
/// use ocga_akn::types::chapter_of;
///
/// assert_eq!(chapter_of("48-1-2"), "1");
/// assert_eq!(chapter_of("48"), "");
/// ```
#[must_use]
pub fn chapter_of(section_number: &str) -> &str {
    section_number.split('-').nth(1).unwrap_or_default()
}
