//! End-to-end integration tests for the conversion pipeline.
//!
//! Tests the complete pipeline from archive XML to AKN documents using a
//! trimmed fixture of Title 48 (Revenue and Taxation).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use ocga_akn::akn::build_document;
use ocga_akn::{convert_directory, convert_title, parse_source, TitleOutcome};

const FIXTURE: &str = "gov.ga.ocga.2018.title.48.xml";

/// Path of a fixture file.
fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Load fixture file content.
fn load_fixture(name: &str) -> String {
    let path = fixture_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e))
}

fn generation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
}

/// Child elements of a node with the given local name.
fn children<'a, 'input>(
    node: roxmltree::Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn child<'a, 'input>(node: roxmltree::Node<'a, 'input>, name: &'static str) -> roxmltree::Node<'a, 'input> {
    children(node, name)
        .next()
        .unwrap_or_else(|| panic!("missing <{name}>"))
}

fn text_at(node: roxmltree::Node<'_, '_>, path: &[&'static str]) -> String {
    let target = path.iter().fold(node, |current, name| child(current, *name));
    target.text().unwrap_or_default().to_string()
}

fn find_eid<'a, 'input>(doc: &'a roxmltree::Document<'input>, eid: &str) -> roxmltree::Node<'a, 'input> {
    doc.descendants()
        .find(|n| n.attribute("eId") == Some(eid))
        .unwrap_or_else(|| panic!("missing eId {eid}"))
}

#[test]
fn test_pipeline_section_extraction() {
    let sections = parse_source(&load_fixture(FIXTURE)).unwrap();

    let numbers: Vec<_> = sections.iter().map(|s| s.section_number.as_str()).collect();
    assert_eq!(numbers, vec!["48-1-1", "48-1-2", "48-10-1", "48-2-1"]);

    let short_title = &sections[0];
    assert_eq!(
        short_title.text,
        "This title shall be known and may be cited as the \"Georgia Revenue Code.\""
    );
    assert!(short_title.subsections.is_empty());
    assert_eq!(short_title.chapter_title.as_deref(), Some("GENERAL PROVISIONS"));

    let definitions = &sections[1];
    assert_eq!(definitions.intro, "As used in this title, the term:");
    assert_eq!(definitions.subsections.len(), 2);
    assert_eq!(definitions.subsections[0].text, "\"Ad valorem tax\" means a tax.");
    assert_eq!(definitions.subsections[1].text, "\"Commissioner\" means:");
    assert_eq!(
        definitions.subsections[1].children[0].text,
        "The state revenue commissioner; or"
    );
    assert_eq!(definitions.subsections[1].children[1].text, "A designee.");

    assert_eq!(sections[3].text, "Taxes under Code Section 48-1-2 \u{2014} see \u{a7} 2.");
    assert_eq!(sections[3].chapter_title, None);
}

#[test]
fn test_pipeline_document_structure() {
    let sections = parse_source(&load_fixture(FIXTURE)).unwrap();
    let tree = build_document(48, &sections, generation_date());
    let xml = ocga_akn::akn::to_xml_string(&tree).unwrap();

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<akomaNtoso"));

    let doc = roxmltree::Document::parse(&xml).unwrap();
    let root = doc.root_element();
    assert_eq!(
        root.tag_name().namespace(),
        Some("http://docs.oasis-open.org/legaldocml/ns/akn/3.0")
    );

    let body = child(child(root, "act"), "body");
    let chapters: Vec<_> = children(body, "chapter")
        .filter_map(|c| c.attribute("eId"))
        .collect();
    assert_eq!(chapters, vec!["chp_48-1", "chp_48-10", "chp_48-2"]);

    let chapter_one = find_eid(&doc, "chp_48-1");
    assert_eq!(text_at(chapter_one, &["num"]), "Chapter 1");
    assert_eq!(text_at(chapter_one, &["heading"]), "GENERAL PROVISIONS");

    let definitions = find_eid(&doc, "sec_48-1-2");
    assert_eq!(text_at(definitions, &["num"]), "48-1-2");
    assert_eq!(text_at(definitions, &["heading"]), "Definitions");
    assert_eq!(
        text_at(definitions, &["intro", "p"]),
        "As used in this title, the term:"
    );
    assert_eq!(
        text_at(definitions, &["notes", "note", "p"]),
        "Code 1981, 48-1-2."
    );

    let sub_b = find_eid(&doc, "sec_48-1-2__subsec_b");
    assert_eq!(text_at(sub_b, &["num"]), "(b)");
    let para = find_eid(&doc, "sec_48-1-2__subsec_b__para_2");
    assert_eq!(text_at(para, &["num"]), "(2)");
    assert_eq!(text_at(para, &["content", "p"]), "A designee.");

    let reserved = find_eid(&doc, "sec_48-10-1");
    assert!(children(reserved, "heading").next().is_none());
    assert_eq!(text_at(reserved, &["content", "p"]), "Reserved.");
}

#[test]
fn test_single_definition_section() {
    let xml = r#"<Title>
  <Index Level="3">
    <Caption>48-1-2</Caption>
    <Description>Definitions</Description>
    <Content>(a) Means this.</Content>
  </Index>
</Title>"#;

    let sections = parse_source(xml).unwrap();
    let tree = build_document(48, &sections, generation_date());
    let body = tree.find_path("act/body").unwrap();

    assert_eq!(body.children.len(), 1);
    let chapter = &body.children[0];
    assert_eq!(chapter.attr("eId"), Some("chp_48-1"));

    let section = chapter.child("section").unwrap();
    assert_eq!(section.attr("eId"), Some("sec_48-1-2"));
    assert_eq!(section.child("heading").unwrap().text_or_empty(), "Definitions");

    let subsection = section.child("subsection").unwrap();
    assert_eq!(subsection.attr("eId"), Some("sec_48-1-2__subsec_a"));
    assert_eq!(
        subsection.find_path("content/p").unwrap().text_or_empty(),
        "Means this."
    );
}

#[test]
fn test_convert_title_fixture() {
    let output = tempdir().unwrap();
    let outcome = convert_title(&fixture_path(FIXTURE), output.path(), generation_date()).unwrap();

    assert_eq!(
        outcome,
        TitleOutcome::Written {
            path: output.path().join("us-ga-title-48.akn.xml"),
            sections: 4,
        }
    );

    let xml = fs::read_to_string(output.path().join("us-ga-title-48.akn.xml")).unwrap();
    assert!(xml.contains("<FRBRdate date=\"2026-10-18\" name=\"generation\"/>"));
    assert!(xml.contains("<FRBRthis value=\"/akn/us-ga/act/ocga/title-48\"/>"));
}

#[test]
fn test_convert_directory_batch() {
    let source = tempdir().unwrap();
    let output_root = tempdir().unwrap();
    let output = output_root.path().join("akn");

    fs::copy(fixture_path(FIXTURE), source.path().join(FIXTURE)).unwrap();
    // Empty title: no sections, no file
    fs::write(
        source.path().join("gov.ga.ocga.2018.title.3.xml"),
        "<Title><Index Level=\"1\"><Caption>TITLE 3</Caption></Index></Title>",
    )
    .unwrap();
    // Malformed title: logged, batch continues
    fs::write(
        source.path().join("gov.ga.ocga.2018.title.4.xml"),
        "<Title><Index Level=\"3\">",
    )
    .unwrap();
    // Name without a title number: skipped
    fs::write(source.path().join("gov.ga.ocga.2018.title.4a.xml"), "<Title/>").unwrap();
    // Not a candidate at all
    fs::write(source.path().join("notes.txt"), "ignore me").unwrap();

    let report = convert_directory(source.path(), &output).unwrap();

    assert_eq!(report.titles_processed, 1);
    assert_eq!(report.files_written, 1);
    assert_eq!(report.sections_converted, 4);
    assert_eq!(report.titles_failed, 1);
    assert_eq!(report.output_dir, output);

    let mut written: Vec<_> = fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, vec!["us-ga-title-48.akn.xml"]);
}

#[test]
fn test_convert_directory_missing_source() {
    let root = tempdir().unwrap();
    let output = root.path().join("out");

    assert!(convert_directory(&root.path().join("missing"), &output).is_err());
    assert!(!output.exists());
}
