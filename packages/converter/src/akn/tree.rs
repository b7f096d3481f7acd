//! Owned element tree for Akoma Ntoso output.

/// An output element: a name, attributes in insertion order, and either text
/// or child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Local element name (all output lives in the default AKN namespace).
    pub name: &'static str,

    /// Attributes in the order they are written.
    pub attributes: Vec<(&'static str, String)>,

    /// Text content.
    pub text: Option<String>,

    /// Child elements.
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child element in place.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Value of an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First child element with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All child elements with the given name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a slash-separated path of child names, e.g. `"content/p"`.
    #[must_use]
    pub fn find_path(&self, path: &str) -> Option<&Element> {
        path.split('/').try_fold(self, |current, name| current.child(name))
    }

    /// Depth-first search for the element carrying the given `eId`.
    #[must_use]
    pub fn find_by_eid(&self, eid: &str) -> Option<&Element> {
        if self.attr("eId") == Some(eid) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find_by_eid(eid))
    }

    /// Text of the element, or an empty string.
    #[must_use]
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

/// `<tag><p>text</p></tag>`, the shape of every AKN text block used here.
#[must_use]
pub fn paragraph_block(name: &'static str, text: impl Into<String>) -> Element {
    Element::new(name).with_child(Element::new("p").with_text(text))
}
