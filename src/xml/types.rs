//! Response tree abstractions

use crate::types::JsonValue;

/// Key under which [`ResponseNode::to_tree`] places an element's attributes
pub const ATTRIBUTES_KEY: &str = "@attributes";

/// Key under which [`ResponseNode::to_tree`] places text that sits next to
/// attributes or child elements
pub const TEXT_KEY: &str = "#text";

/// Read-only view of one element of a parsed response body
///
/// Child lookups match on the element name exactly (RETS tag names are
/// case-sensitive). Implementations must return children in document order.
pub trait ResponseNode {
    /// Element name
    fn name(&self) -> &str;

    /// First child element with the given name
    fn child(&self, name: &str) -> Option<&Self>;

    /// All child elements with the given name, in document order
    fn children(&self, name: &str) -> Vec<&Self>;

    /// Attribute value of this element
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Text content directly under this element, whitespace preserved
    fn text(&self) -> &str;

    /// Convert the element into a generic attribute/value tree
    ///
    /// Attributes go under [`ATTRIBUTES_KEY`], children are keyed by name,
    /// a repeated child name becomes an array and a single child stays a bare
    /// object. Text-only leaves become strings.
    fn to_tree(&self) -> JsonValue;

    /// Whether a child element with the given name exists
    fn has_child(&self, name: &str) -> bool {
        self.child(name).is_some()
    }

    /// Text of the first child element with the given name
    fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(ResponseNode::text)
    }

    /// Attribute value of the first child element with the given name
    fn child_attribute(&self, child: &str, attribute: &str) -> Option<&str> {
        self.child(child).and_then(|c| c.attribute(attribute))
    }
}
