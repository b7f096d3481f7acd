//! Section extraction from the archive's index-entry XML.
//!
//! A title file is a tree of `<Index Level="..">` elements. Levels 3 and 4
//! hold sections; level 2 holds chapters. Each entry may carry `<Caption>`,
//! `<Description>`, `<Content>` (HTML-escaped) and `<RevisionHistory>`.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use roxmltree::{Descendants, Document, Node, ParsingOptions};

use crate::config::{CHAPTER_LEVEL, SECTION_LEVELS};
use crate::error::Result;
use crate::splitting::parse_subsections;
use crate::text::clean_html_content;
use crate::types::{SectionRecord, SourceEntry};
use crate::xml::{child_text, get_tag_name};

/// Section number inside a caption, e.g. "48-1-2" or "48-7-40.1".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+-\d+-\d+(?:\.\d+)?").expect("valid regex"));

/// Chapter number inside a chapter caption, e.g. "CHAPTER 1".
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CHAPTER_CAPTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bchapter\s+(\d+)\b").expect("valid regex"));

impl SourceEntry {
    /// Read an `<Index>` element.
    #[must_use]
    pub fn from_node(node: Node<'_, '_>) -> Self {
        let owned = |tag: &str| child_text(node, tag).map(str::to_string);
        Self {
            level: node.attribute("Level").unwrap_or_default().to_string(),
            caption: owned("Caption"),
            description: owned("Description"),
            content: owned("Content"),
            revision_history: owned("RevisionHistory"),
        }
    }

    /// Whether the entry sits at a section level.
    #[must_use]
    pub fn is_section_level(&self) -> bool {
        SECTION_LEVELS.contains(&self.level.as_str())
    }

    /// Whether the entry sits at the chapter level.
    #[must_use]
    pub fn is_chapter_level(&self) -> bool {
        self.level == CHAPTER_LEVEL
    }
}

/// Trimmed, non-empty value of an optional field.
fn trimmed(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Iterator over the `<Index>` entries of a title, in document order.
///
/// Decouples extraction from the DOM: consumers only see [`SourceEntry`]
/// values.
pub struct IndexEntries<'a, 'input> {
    descendants: Descendants<'a, 'input>,
    sections_only: bool,
}

impl<'a, 'input> Iterator for IndexEntries<'a, 'input> {
    type Item = SourceEntry;

    fn next(&mut self) -> Option<SourceEntry> {
        let sections_only = self.sections_only;
        self.descendants
            .by_ref()
            .filter(|n| n.is_element() && get_tag_name(*n) == "Index")
            .map(SourceEntry::from_node)
            .find(|entry| !sections_only || entry.is_section_level())
    }
}

/// Every `<Index>` entry below (and including) `root`.
pub fn index_entries<'a, 'input>(root: Node<'a, 'input>) -> IndexEntries<'a, 'input> {
    IndexEntries {
        descendants: root.descendants(),
        sections_only: false,
    }
}

/// Entries at one of the section levels: the candidates for extraction.
pub fn candidate_entries<'a, 'input>(root: Node<'a, 'input>) -> IndexEntries<'a, 'input> {
    IndexEntries {
        descendants: root.descendants(),
        sections_only: true,
    }
}

/// Extract the section number from a caption.
///
/// Falls back to the caption with spaces and periods replaced by hyphens
/// when no section number is present.
///
/// # Examples
/// ```
/// use ocga_akn::source::extract_section_number;
///
/// assert_eq!(extract_section_number("48-1-2 Definitions"), "48-1-2");
/// assert_eq!(extract_section_number("48-7-40.1"), "48-7-40.1");
/// assert_eq!(extract_section_number("Title 48"), "Title-48");
/// ```
#[must_use]
pub fn extract_section_number(caption: &str) -> String {
    SECTION_NUMBER_PATTERN.find(caption).map_or_else(
        || caption.replace([' ', '.'], "-"),
        |m| m.as_str().to_string(),
    )
}

/// Convert a section-level entry into a section record.
///
/// Returns `None` for entries that are not statute text: missing caption or
/// a caption without a three-part section number.
#[must_use]
pub fn extract_section(entry: &SourceEntry) -> Option<SectionRecord> {
    let caption = trimmed(entry.caption.as_ref())?;

    if !SECTION_NUMBER_PATTERN.is_match(caption) {
        tracing::debug!(caption = %caption, "Skipping entry without section number");
        return None;
    }

    let section_number = extract_section_number(caption);
    if section_number.is_empty() {
        return None;
    }

    let text = entry
        .content
        .as_deref()
        .map(clean_html_content)
        .unwrap_or_default();
    let body = parse_subsections(&text);

    let record = SectionRecord::new(section_number, text)
        .with_title(trimmed(entry.description.as_ref()).unwrap_or_default())
        .with_history(trimmed(entry.revision_history.as_ref()).unwrap_or_default())
        .with_subsections(body.intro, body.subsections);

    tracing::debug!(
        section = %record.section_number,
        subsections = record.subsections.len(),
        "Extracted section"
    );

    Some(record)
}

/// Chapter number and heading declared by a chapter-level entry.
fn chapter_heading(entry: &SourceEntry) -> Option<(String, String)> {
    let caption = trimmed(entry.caption.as_ref())?;
    let number = CHAPTER_CAPTION_PATTERN.captures(caption)?.get(1)?.as_str();
    let heading = trimmed(entry.description.as_ref())?;
    Some((number.to_string(), heading.to_string()))
}

/// Chapter headings declared by chapter-level entries, keyed by chapter number.
///
/// The first declaration of a chapter wins.
pub fn chapter_headings(root: Node<'_, '_>) -> HashMap<String, String> {
    let mut headings = HashMap::new();
    for (number, heading) in index_entries(root)
        .filter(SourceEntry::is_chapter_level)
        .filter_map(|entry| chapter_heading(&entry))
    {
        headings.entry(number).or_insert(heading);
    }
    headings
}

/// Extract all section records of a title, in source order.
///
/// Chapter headings declared by chapter-level entries are attached to the
/// sections of that chapter.
pub fn extract_sections(root: Node<'_, '_>) -> Vec<SectionRecord> {
    let headings = chapter_headings(root);

    candidate_entries(root)
        .filter_map(|entry| extract_section(&entry))
        .map(|record| match headings.get(&record.chapter) {
            Some(heading) => record.with_chapter_title(heading.clone()),
            None => record,
        })
        .collect()
}

/// Parse a title file and extract its section records.
pub fn parse_source(xml: &str) -> Result<Vec<SectionRecord>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(xml, options)?;
    Ok(extract_sections(doc.root_element()))
}
