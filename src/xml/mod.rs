//! Response tree module
//!
//! Abstracts the parsed XML body of a search response behind the
//! [`ResponseNode`] trait so the decoder never depends on a particular
//! XML library.
//!
//! # Overview
//!
//! - [`ResponseNode`] - typed accessors the decoder uses (`has_child`,
//!   `child_text`, `attribute`, ...) plus conversion to a generic
//!   attribute/value tree
//! - [`Element`] - owned element tree with a small XML reader, the default
//!   implementation of [`ResponseNode`]

mod element;
mod reader;
mod types;

pub use element::Element;
pub use types::{ResponseNode, ATTRIBUTES_KEY, TEXT_KEY};

#[cfg(test)]
mod tests;
