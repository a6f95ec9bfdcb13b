// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # rets-search
//!
//! Decoder for RETS search responses.
//!
//! A RETS server answers a search in one of two encodings inside the same
//! `<RETS>` envelope:
//!
//! - **COMPACT**: a `COLUMNS` line and `DATA` lines, fields separated by the
//!   character declared in `DELIMITER` (TAB when absent)
//! - **RETS-RESPONSE**: nested XML whose shape depends on cardinality; one
//!   child becomes an object, several become a list
//!
//! Both decode into the same [`Results`]: headers, ordered records, the
//! server's total count and the MAXROWS truncation flag.
//!
//! ## Quick Start
//!
//! ```rust
//! use rets_search::{parse_search_response, SearchParameters};
//!
//! let body = "<RETS ReplyCode=\"0\">\
//!     <COUNT Records=\"1\"/>\
//!     <DELIMITER value=\"09\"/>\
//!     <COLUMNS>\tListingID\tListPrice\t</COLUMNS>\
//!     <DATA>\t1001\t250000\t</DATA>\
//!     </RETS>";
//!
//! let params = SearchParameters::new("Property", "RES");
//! let results = parse_search_response(body, &params)?;
//!
//! assert_eq!(results.total_results_count(), Some(1));
//! assert_eq!(results.first().unwrap().get_str("ListPrice"), Some("250000"));
//! # Ok::<(), rets_search::Error>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 SearchParser::parse                      │
//! │   metadata → encoding → headers → records → Results      │
//! └──────────────────────────────────────────────────────────┘
//!                              │
//! ┌──────────────┬─────────────┴───────┬─────────────────────┐
//! │  Delimiter   │     RowDecoder      │     Flattener       │
//! ├──────────────┼─────────────────────┼─────────────────────┤
//! │ DELIMITER    │ COLUMNS / DATA      │ @attributes hoist   │
//! │ TAB fallback │ pad / strict rows   │ singleton → list    │
//! └──────────────┴─────────────────────┴─────────────────────┘
//!                              │
//!              ResponseNode (xml::Element by default)
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Response tree abstraction and XML reader
pub mod xml;

/// Delimiter, row and attribute decoding
pub mod decode;

/// Response assembly and result sets
pub mod search;

/// Arrow/Parquet output
pub mod output;

/// YAML configuration loading
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use decode::{DecoderConfig, RepeatableField, RowPolicy};
pub use search::{Record, Results, SearchParser};
pub use xml::{Element, ResponseNode};

/// Decode a raw search response body with default settings
pub fn parse_search_response(body: &str, params: &SearchParameters) -> Result<Results> {
    SearchParser::new().parse_str(body, params)
}
