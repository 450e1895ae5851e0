//! In-memory archival description tree.
//!
//! The tree mirrors the target schema one element per node. Attribute order
//! carries no meaning, so attributes live in a sorted map; child order is
//! significant and preserved as built.

use std::collections::BTreeMap;

/// A node in the output document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentNode {
    Element(Element),
    Comment(String),
}

impl DocumentNode {
    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            Self::Comment(_) => None,
        }
    }
}

impl From<Element> for DocumentNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// A labeled element with attributes, optional text and ordered children.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    children: Vec<DocumentNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Merge an attribute fragment. Accepts `Option<(k, v)>` so absent
    /// fragments simply add nothing.
    #[must_use]
    pub fn with_attrs<I, K, V>(mut self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in attrs {
            self.set_attr(name, value);
        }
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<DocumentNode>) -> Self {
        self.push(child);
        self
    }

    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<DocumentNode>,
    {
        self.extend(children);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn push(&mut self, child: impl Into<DocumentNode>) {
        self.children.push(child.into());
    }

    pub fn extend<I>(&mut self, children: I)
    where
        I: IntoIterator,
        I::Item: Into<DocumentNode>,
    {
        self.children.extend(children.into_iter().map(Into::into));
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[DocumentNode] {
        &self.children
    }

    /// Child elements, skipping comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(DocumentNode::as_element)
    }

    /// First child element with the given tag.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|element| element.tag == tag)
    }

    /// All child elements with the given tag, in document order.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |element| element.tag == tag)
    }

    /// Every element in this subtree (self included) in document order.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in self.elements() {
            out.extend(child.descendants());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_attribute_fragments_add_nothing() {
        let none: Option<(&str, String)> = None;
        let element = Element::new("p").with_text("line").with_attrs(none);
        assert!(element.attributes().is_empty());
        assert_eq!(element.text(), Some("line"));
    }

    #[test]
    fn children_keep_insertion_order() {
        let element = Element::new("scopecontent")
            .with_child(Element::new("p").with_text("a"))
            .with_child(DocumentNode::comment("note"))
            .with_child(Element::new("list"))
            .with_child(Element::new("p").with_text("b"));
        let tags: Vec<&str> = element.elements().map(Element::tag).collect();
        assert_eq!(tags, vec!["p", "list", "p"]);
        assert_eq!(element.children().len(), 4);
        assert_eq!(element.find_all("p").count(), 2);
    }

    #[test]
    fn descendants_walk_depth_first() {
        let element = Element::new("did")
            .with_child(Element::new("unittitle").with_child(Element::new("title")))
            .with_child(Element::new("unitdate"));
        let tags: Vec<&str> = element.descendants().into_iter().map(Element::tag).collect();
        assert_eq!(tags, vec!["did", "unittitle", "title", "unitdate"]);
    }
}
