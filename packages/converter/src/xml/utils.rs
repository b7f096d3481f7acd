//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ocga_akn::xml::get_tag_name;
///
/// let xml = r#"<Title><Index Level="3"/></Title>"#;
/// let doc = Document::parse(xml).unwrap();
/// let index = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(index), "Index");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ocga_akn::xml::find_child;
///
/// let xml = r#"<Index><Caption>48-1-2</Caption></Index>"#;
/// let doc = Document::parse(xml).unwrap();
/// let index = doc.root_element();
///
/// assert!(find_child(index, "Caption").is_some());
/// assert!(find_child(index, "Content").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|child| child.is_element() && get_tag_name(*child) == tag)
}

/// Raw text of the first child element with the given tag name.
///
/// Returns `None` when the child is missing or has no text.
pub fn child_text<'a>(node: Node<'a, '_>, tag: &str) -> Option<&'a str> {
    find_child(node, tag)?.text()
}
