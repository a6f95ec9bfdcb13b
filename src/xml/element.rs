//! Owned XML element tree

use super::reader::Reader;
use super::types::{ResponseNode, ATTRIBUTES_KEY, TEXT_KEY};
use crate::error::Result;
use crate::types::{JsonObject, JsonValue};

/// One parsed XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub(crate) name: String,
    pub(crate) attributes: Vec<(String, String)>,
    pub(crate) children: Vec<Element>,
    pub(crate) text: String,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Parse a complete XML document and return its root element
    pub fn parse(xml: &str) -> Result<Self> {
        Reader::new(xml).read_document()
    }

    /// Add an attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Add a child element
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append text content
    #[must_use]
    pub fn with_text(mut self, text: impl AsRef<str>) -> Self {
        self.text.push_str(text.as_ref());
        self
    }

    /// All attributes in document order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All child elements in document order
    pub fn elements(&self) -> &[Element] {
        &self.children
    }
}

impl ResponseNode for Element {
    fn name(&self) -> &str {
        &self.name
    }

    fn child(&self, name: &str) -> Option<&Self> {
        self.children.iter().find(|c| c.name == name)
    }

    fn children(&self, name: &str) -> Vec<&Self> {
        self.children.iter().filter(|c| c.name == name).collect()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn to_tree(&self) -> JsonValue {
        if self.attributes.is_empty() && self.children.is_empty() {
            return JsonValue::String(self.text.clone());
        }

        let mut obj = JsonObject::new();

        if !self.attributes.is_empty() {
            let attrs = self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), JsonValue::String(v.clone())))
                .collect();
            obj.insert(ATTRIBUTES_KEY.to_string(), JsonValue::Object(attrs));
        }

        // Whitespace between child elements is formatting, not content
        if !self.text.trim().is_empty() {
            obj.insert(TEXT_KEY.to_string(), JsonValue::String(self.text.clone()));
        }

        for child in &self.children {
            let value = child.to_tree();
            match obj.get_mut(&child.name) {
                Some(JsonValue::Array(arr)) => arr.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = JsonValue::Array(vec![first, value]);
                }
                None => {
                    obj.insert(child.name.clone(), value);
                }
            }
        }

        JsonValue::Object(obj)
    }
}
