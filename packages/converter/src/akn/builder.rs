//! Document tree builder: section records to an Akoma Ntoso act.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::metadata::{build_metadata, MetadataOptions};
use super::tree::{paragraph_block, Element};
use crate::config::{
    AKN_NAMESPACE, CHAPTER_EID_PREFIX, MAX_CONTENT_TEXT, MAX_HISTORY_TEXT, MAX_INTRO_TEXT,
    PARAGRAPH_EID_SEPARATOR, PUBLICATION_DATE, SECTION_EID_PREFIX, SUBSECTION_EID_SEPARATOR,
};
use crate::text::truncate_chars;
use crate::types::{SectionRecord, SubsectionNode};

/// Builds the eId of a division from its parent's eId and its label.
type EidFn = fn(&str, &str) -> String;

/// Element name and eId scheme for each division depth below a section.
const DIVISION_LEVELS: [(&str, EidFn); 2] = [
    ("subsection", subsection_eid),
    ("paragraph", paragraph_eid),
];

/// eId of a section.
///
/// # Examples
/// ```
/// use ocga_akn::akn::section_eid;
///
/// assert_eq!(section_eid("48-1-2"), "sec_48-1-2");
/// ```
#[must_use]
pub fn section_eid(section_number: &str) -> String {
    format!("{SECTION_EID_PREFIX}{section_number}")
}

/// eId of a subsection inside a section.
#[must_use]
pub fn subsection_eid(section_eid: &str, identifier: &str) -> String {
    format!("{section_eid}{SUBSECTION_EID_SEPARATOR}{identifier}")
}

/// eId of a paragraph inside a subsection.
#[must_use]
pub fn paragraph_eid(subsection_eid: &str, identifier: &str) -> String {
    format!("{subsection_eid}{PARAGRAPH_EID_SEPARATOR}{identifier}")
}

/// eId of a chapter inside a title.
#[must_use]
pub fn chapter_eid(title: u32, chapter: &str) -> String {
    format!("{CHAPTER_EID_PREFIX}{title}-{chapter}")
}

/// Sections of one chapter, in extraction order.
#[derive(Debug)]
pub struct ChapterGroup<'a> {
    /// Chapter key.
    pub key: &'a str,

    /// Member sections.
    pub sections: Vec<&'a SectionRecord>,
}

impl ChapterGroup<'_> {
    /// First heading declared by a member section.
    #[must_use]
    pub fn heading(&self) -> Option<&str> {
        self.sections
            .iter()
            .find_map(|s| s.chapter_title.as_deref())
    }
}

/// Group sections by chapter key.
///
/// Sections with an empty chapter key are dropped. Groups come back sorted
/// by key as plain strings, so "10" precedes "2"; sections keep their order
/// within a group.
#[must_use]
pub fn group_by_chapter(sections: &[SectionRecord]) -> Vec<ChapterGroup<'_>> {
    let mut groups: Vec<ChapterGroup<'_>> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for section in sections {
        let key = section.chapter.as_str();
        if key.is_empty() {
            tracing::debug!(section = %section.section_number, "Dropping section without chapter");
            continue;
        }
        let index = *positions.entry(key).or_insert_with(|| {
            groups.push(ChapterGroup {
                key,
                sections: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].sections.push(section);
    }

    groups.sort_by(|a, b| a.key.cmp(b.key));
    groups
}

/// Build a subsection or paragraph element at the given depth.
///
/// Returns `None` for nodes deeper than the supported division levels.
fn build_division(node: &SubsectionNode, parent_eid: &str, depth: usize) -> Option<Element> {
    let &(name, make_eid) = DIVISION_LEVELS.get(depth)?;
    let eid = make_eid(parent_eid, &node.identifier);

    let mut element = Element::new(name)
        .with_attr("eId", eid.as_str())
        .with_child(Element::new("num").with_text(format!("({})", node.identifier)))
        .with_child(paragraph_block("content", node.text.as_str()));

    for child in &node.children {
        if let Some(child) = build_division(child, &eid, depth + 1) {
            element.push(child);
        }
    }

    Some(element)
}

/// Build a `<section>` element.
#[must_use]
pub fn build_section(section: &SectionRecord) -> Element {
    let eid = section_eid(&section.section_number);
    let mut element = Element::new("section")
        .with_attr("eId", eid.as_str())
        .with_child(Element::new("num").with_text(section.section_number.as_str()));

    if !section.title.is_empty() {
        element.push(Element::new("heading").with_text(section.title.as_str()));
    }

    if section.subsections.is_empty() {
        element.push(paragraph_block(
            "content",
            truncate_chars(&section.text, MAX_CONTENT_TEXT),
        ));
    } else {
        if !section.intro.is_empty() {
            element.push(paragraph_block(
                "intro",
                truncate_chars(&section.intro, MAX_INTRO_TEXT),
            ));
        }
        for subsection in &section.subsections {
            if let Some(child) = build_division(subsection, &eid, 0) {
                element.push(child);
            }
        }
    }

    if !section.history.is_empty() {
        let note = Element::new("note")
            .with_attr("type", "history")
            .with_child(
                Element::new("p").with_text(truncate_chars(&section.history, MAX_HISTORY_TEXT)),
            );
        element.push(Element::new("notes").with_child(note));
    }

    element
}

/// Build a `<chapter>` element from a group.
#[must_use]
pub fn build_chapter(title: u32, group: &ChapterGroup<'_>) -> Element {
    let mut element = Element::new("chapter")
        .with_attr("eId", chapter_eid(title, group.key))
        .with_child(Element::new("num").with_text(format!("Chapter {}", group.key)));

    if let Some(heading) = group.heading() {
        element.push(Element::new("heading").with_text(heading));
    }

    for section in &group.sections {
        element.push(build_section(section));
    }

    tracing::debug!(
        chapter = %group.key,
        sections = group.sections.len(),
        "Built chapter"
    );

    element
}

/// Build the full document tree of a title.
#[must_use]
pub fn build_document(
    title: u32,
    sections: &[SectionRecord],
    generation_date: NaiveDate,
) -> Element {
    let meta = build_metadata(&MetadataOptions {
        title,
        publication_date: PUBLICATION_DATE,
        generation_date,
    });

    let mut body = Element::new("body");
    for group in group_by_chapter(sections) {
        body.push(build_chapter(title, &group));
    }

    let act = Element::new("act").with_child(meta).with_child(body);

    Element::new("akomaNtoso")
        .with_attr("xmlns", AKN_NAMESPACE)
        .with_child(act)
}
