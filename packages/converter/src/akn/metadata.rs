//! The `<meta>` block of a title document.

use chrono::NaiveDate;

use super::tree::Element;
use crate::config::{
    expression_uri, manifestation_uri, work_uri, COUNTRY, LANGUAGE, LEGISLATURE_EID,
    LEGISLATURE_HREF, LEGISLATURE_SHOW_AS, PUBLICATION_NAME, PUBLICATION_SHOW_AS, PUBLISHER_EID,
    PUBLISHER_HREF, PUBLISHER_SHOW_AS,
};

/// Inputs that determine the metadata block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataOptions<'a> {
    /// Title number.
    pub title: u32,

    /// Publication date of the source release (YYYY-MM-DD).
    pub publication_date: &'a str,

    /// Date the manifestation was generated.
    pub generation_date: NaiveDate,
}

fn frbr_value(name: &'static str, value: impl Into<String>) -> Element {
    Element::new(name).with_attr("value", value)
}

fn frbr_date(date: impl Into<String>, name: &str) -> Element {
    Element::new("FRBRdate")
        .with_attr("date", date)
        .with_attr("name", name)
}

fn frbr_author(eid: &str) -> Element {
    Element::new("FRBRauthor").with_attr("href", format!("#{eid}"))
}

fn organization(eid: &str, href: &str, show_as: &str) -> Element {
    Element::new("TLCOrganization")
        .with_attr("eId", eid)
        .with_attr("href", href)
        .with_attr("showAs", show_as)
}

/// Build the `<meta>` element.
///
/// Pure function of its options: identical options always yield an identical
/// subtree.
#[must_use]
pub fn build_metadata(options: &MetadataOptions<'_>) -> Element {
    let title = options.title;
    let published = options.publication_date;

    let work = Element::new("FRBRWork")
        .with_child(frbr_value("FRBRthis", work_uri(title)))
        .with_child(frbr_value("FRBRuri", work_uri(title)))
        .with_child(frbr_date(published, "publication"))
        .with_child(frbr_author(LEGISLATURE_EID))
        .with_child(frbr_value("FRBRcountry", COUNTRY))
        .with_child(frbr_value("FRBRnumber", title.to_string()));

    let expression = Element::new("FRBRExpression")
        .with_child(frbr_value("FRBRthis", expression_uri(title, published)))
        .with_child(frbr_value("FRBRuri", expression_uri(title, published)))
        .with_child(frbr_date(published, "publication"))
        .with_child(frbr_author(PUBLISHER_EID))
        .with_child(Element::new("FRBRlanguage").with_attr("language", LANGUAGE));

    let manifestation = Element::new("FRBRManifestation")
        .with_child(frbr_value("FRBRthis", manifestation_uri(title, published)))
        .with_child(frbr_value("FRBRuri", manifestation_uri(title, published)))
        .with_child(frbr_date(
            options.generation_date.format("%Y-%m-%d").to_string(),
            "generation",
        ))
        .with_child(frbr_author(PUBLISHER_EID));

    let identification = Element::new("identification")
        .with_attr("source", format!("#{PUBLISHER_EID}"))
        .with_child(work)
        .with_child(expression)
        .with_child(manifestation);

    let publication = Element::new("publication")
        .with_attr("date", published)
        .with_attr("name", PUBLICATION_NAME)
        .with_attr("showAs", PUBLICATION_SHOW_AS);

    let references = Element::new("references")
        .with_child(organization(
            LEGISLATURE_EID,
            LEGISLATURE_HREF,
            LEGISLATURE_SHOW_AS,
        ))
        .with_child(organization(PUBLISHER_EID, PUBLISHER_HREF, PUBLISHER_SHOW_AS));

    Element::new("meta")
        .with_child(identification)
        .with_child(publication)
        .with_child(references)
}
