//! Response decoder module
//!
//! Supports both search result encodings: the delimited `COLUMNS`/`DATA`
//! table and the nested RETS-RESPONSE tree.
//!
//! # Overview
//!
//! - [`resolve_delimiter`] - field separator of the delimited encoding
//! - [`RowDecoder`] - header and data-row splitting
//! - [`Flattener`] - attribute hoisting and singleton-list repair
//! - [`record_from_node`] - one RETS-RESPONSE node to one record

mod delimiter;
mod flatten;
mod rows;
mod types;

pub use delimiter::{resolve_delimiter, DELIMITER_ELEMENT, DELIMITER_VALUE};
pub use flatten::Flattener;
pub(crate) use rows::kind;
pub use rows::{record_from_node, RowDecoder, COLUMNS_ELEMENT, DATA_ELEMENT};
pub use types::{DecoderConfig, RepeatableField, RowPolicy, DEFAULT_DELIMITER};
