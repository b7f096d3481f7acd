//! Configuration constants and validation functions for the converter.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ConverterError, Result};

/// Akoma Ntoso 3.0 namespace used as the default namespace of every output file.
pub const AKN_NAMESPACE: &str = "http://docs.oasis-open.org/legaldocml/ns/akn/3.0";

/// Publication date of the 2018 OCGA archive release.
pub const PUBLICATION_DATE: &str = "2018-12-01";

/// Name of the publication as shown in the metadata block.
pub const PUBLICATION_NAME: &str = "Official Code of Georgia Annotated";

/// Short form of the publication name.
pub const PUBLICATION_SHOW_AS: &str = "OCGA";

/// Jurisdiction code used in URIs and the work's country.
pub const COUNTRY: &str = "us-ga";

/// Language of the expression.
pub const LANGUAGE: &str = "eng";

/// Prefix shared by every source file of the archive.
pub const SOURCE_FILE_PREFIX: &str = "gov.ga.ocga.2018.title.";

/// Extension of source files.
pub const SOURCE_FILE_EXTENSION: &str = ".xml";

/// Default output directory when none is given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "rules-us-ga-akn";

/// Maximum characters kept for subsection and paragraph text.
pub const MAX_SUBSECTION_TEXT: usize = 2000;

/// Maximum characters kept for section intro text.
pub const MAX_INTRO_TEXT: usize = 500;

/// Maximum characters kept for flat section content.
pub const MAX_CONTENT_TEXT: usize = 5000;

/// Maximum characters kept for history notes.
pub const MAX_HISTORY_TEXT: usize = 1000;

/// Index levels that hold sections in the source schema.
pub const SECTION_LEVELS: [&str; 2] = ["3", "4"];

/// Index level that holds chapters in the source schema.
pub const CHAPTER_LEVEL: &str = "2";

/// Identifier prefixes and separators for generated eIds.
pub const SECTION_EID_PREFIX: &str = "sec_";
pub const CHAPTER_EID_PREFIX: &str = "chp_";
pub const SUBSECTION_EID_SEPARATOR: &str = "__subsec_";
pub const PARAGRAPH_EID_SEPARATOR: &str = "__para_";

/// Organization that enacted the code.
pub const LEGISLATURE_EID: &str = "ga-legislature";
pub const LEGISLATURE_HREF: &str = "/ontology/organization/us-ga/legislature";
pub const LEGISLATURE_SHOW_AS: &str = "Georgia General Assembly";

/// Organization that produced the conversion.
pub const PUBLISHER_EID: &str = "cosilico";
pub const PUBLISHER_HREF: &str = "https://cosilico.ai";
pub const PUBLISHER_SHOW_AS: &str = "Cosilico";

/// Title number embedded in a source file name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"title\.(\d+)\.xml$").expect("valid regex"));

/// Check whether a file name is a candidate source file.
///
/// Candidates still have to pass [`parse_title_number`]; a file like
/// `gov.ga.ocga.2018.title.05a.xml` is a candidate that gets skipped.
#[must_use]
pub fn is_source_file_name(file_name: &str) -> bool {
    file_name.starts_with(SOURCE_FILE_PREFIX) && file_name.ends_with(SOURCE_FILE_EXTENSION)
}

/// Extract the title number from a source file name.
///
/// # Examples
/// ```
/// use ocga_akn::config::parse_title_number;
///
/// assert_eq!(parse_title_number("gov.ga.ocga.2018.title.48.xml").unwrap(), 48);
/// assert!(parse_title_number("gov.ga.ocga.2018.title.48a.xml").is_err());
/// ```
pub fn parse_title_number(file_name: &str) -> Result<u32> {
    let digits = TITLE_FILE_PATTERN
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| ConverterError::InvalidSourceFileName(file_name.to_string()))?;

    let title: u32 = digits
        .as_str()
        .parse()
        .map_err(|_| ConverterError::InvalidSourceFileName(file_name.to_string()))?;

    if title == 0 {
        return Err(ConverterError::InvalidTitleNumber(title));
    }

    Ok(title)
}

/// Output file name for a title, zero-padded to two digits.
///
/// # Examples
/// ```
/// use ocga_akn::config::output_file_name;
///
/// assert_eq!(output_file_name(1), "us-ga-title-01.akn.xml");
/// assert_eq!(output_file_name(48), "us-ga-title-48.akn.xml");
/// ```
#[must_use]
pub fn output_file_name(title: u32) -> String {
    format!("us-ga-title-{title:02}.akn.xml")
}

/// Work URI of a title; expression and manifestation URIs extend it.
#[must_use]
pub fn work_uri(title: u32) -> String {
    format!("/akn/{COUNTRY}/act/ocga/title-{title}")
}

/// Expression URI of a title at the given publication date.
#[must_use]
pub fn expression_uri(title: u32, publication_date: &str) -> String {
    format!("{}/{LANGUAGE}@{publication_date}", work_uri(title))
}

/// Manifestation URI of a title at the given publication date.
#[must_use]
pub fn manifestation_uri(title: u32, publication_date: &str) -> String {
    format!("{}/main.xml", expression_uri(title, publication_date))
}
