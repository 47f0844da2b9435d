//! Minimal in-memory page model the loader renders into.
//!
//! A [`Document`] holds top-level elements addressed by id, the way a page
//! exposes `getElementById`. Each [`Element`] keeps its children in the
//! order they were appended, and can be serialized back to HTML.

use html_escape::encode_double_quoted_attribute;
use itertools::Itertools;

/// Id of the element the article feed is appended to.
pub const ARTICLES_CONTAINER_ID: &str = "articles-container";

/// A single HTML element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Raw markup placed before the children.
    pub inner_html: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: Vec::new(),
            inner_html: String::new(),
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Add classes, skipping ones already present (like `classList.add`).
    pub fn add_classes(&mut self, classes: &[&str]) {
        for class in classes {
            if !self.classes.iter().any(|c| c == class) {
                self.classes.push(class.to_string());
            }
        }
    }

    pub fn append_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Serialize the element, its markup and its children.
    pub fn outer_html(&self) -> String {
        let mut out = format!("<{}", self.tag);
        if let Some(id) = &self.id {
            out.push_str(&format!(" id=\"{}\"", encode_double_quoted_attribute(id)));
        }
        if !self.classes.is_empty() {
            let classes = self.classes.iter().map(|c| encode_double_quoted_attribute(c)).join(" ");
            out.push_str(&format!(" class=\"{}\"", classes));
        }
        out.push('>');
        out.push_str(&self.inner_html);
        for child in &self.children {
            out.push_str(&child.outer_html());
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

/// A page holding top-level elements by id.
#[derive(Debug, Clone, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// A page that already contains an empty `articles-container` div.
    pub fn with_articles_container() -> Self {
        let mut doc = Self::new();
        doc.insert(Element::new("div").with_id(ARTICLES_CONTAINER_ID));
        doc
    }

    /// Add a top-level element. An element with the same id is replaced.
    pub fn insert(&mut self, element: Element) {
        if let Some(id) = &element.id {
            self.elements.retain(|e| e.id.as_ref() != Some(id));
        }
        self.elements.push(element);
    }

    #[cfg(test)]
    pub fn get_element_by_id(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id.as_deref() == Some(id))
    }

    pub fn get_element_by_id_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id.as_deref() == Some(id))
    }

    /// Serialize every top-level element in insertion order.
    pub fn to_html(&self) -> String {
        self.elements.iter().map(Element::outer_html).join("\n")
    }
}
