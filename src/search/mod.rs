//! Search response module
//!
//! # Overview
//!
//! - [`SearchParser`] - decodes one response into a result set
//! - [`Results`] - headers, records and response metadata
//! - [`Record`] - one listing's fields

mod parser;
mod results;

pub use parser::{
    SearchParser, COUNT_ELEMENT, COUNT_RECORDS, MAXROWS_ELEMENT, RETS_RESPONSE_ELEMENT,
};
pub(crate) use results::value_to_text;
pub use results::{Record, Results};
