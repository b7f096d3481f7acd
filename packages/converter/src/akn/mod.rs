//! Akoma Ntoso output: element tree, metadata, document builder and writer.

mod builder;
mod metadata;
mod tree;
mod writer;

pub use builder::{
    build_chapter, build_document, build_section, chapter_eid, group_by_chapter,
    paragraph_eid, section_eid, subsection_eid, ChapterGroup,
};
pub use metadata::{build_metadata, MetadataOptions};
pub use tree::{paragraph_block, Element};
pub use writer::{save_document, to_xml_string};
