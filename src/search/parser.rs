//! Search response assembler
//!
//! Detects which encoding a response uses, decodes the records and collects
//! the response metadata into a [`Results`].

use super::results::Results;
use crate::decode::{
    kind, record_from_node, resolve_delimiter, DecoderConfig, Flattener, RowDecoder,
    COLUMNS_ELEMENT, DATA_ELEMENT,
};
use crate::error::{Error, Result};
use crate::search::Record;
use crate::types::{JsonValue, SearchParameters};
use crate::xml::{Element, ResponseNode, ATTRIBUTES_KEY, TEXT_KEY};
use tracing::{debug, trace};

/// Element carrying the total match count
pub const COUNT_ELEMENT: &str = "COUNT";

/// Attribute of [`COUNT_ELEMENT`] holding the count
pub const COUNT_RECORDS: &str = "Records";

/// Element signalling that the server withheld rows
pub const MAXROWS_ELEMENT: &str = "MAXROWS";

/// Element carrying the nested XML encoding
pub const RETS_RESPONSE_ELEMENT: &str = "RETS-RESPONSE";

/// Assembly progress, strictly forward
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Stage {
    Start,
    MetadataExtracted,
    HeadersResolved,
    RecordsDecoded,
    Done,
}

/// Decodes search responses into [`Results`]
///
/// Holds only configuration; every call works on its own input and returns
/// a freshly owned result set.
#[derive(Debug, Clone, Default)]
pub struct SearchParser {
    config: DecoderConfig,
    flattener: Flattener,
}

impl SearchParser {
    /// Create a parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom settings
    pub fn with_config(config: DecoderConfig) -> Self {
        let flattener = Flattener::from_config(&config);
        Self { config, flattener }
    }

    /// Decoder settings in use
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Parse a raw response body
    pub fn parse_str(&self, body: &str, params: &SearchParameters) -> Result<Results> {
        let root = Element::parse(body)?;
        self.parse(&root, params)
    }

    /// Decode a parsed response tree
    pub fn parse<N: ResponseNode>(&self, root: &N, params: &SearchParameters) -> Result<Results> {
        let mut stage = Stage::Start;
        let mut rs = Results::new(&params.search_type, &params.class);

        // Metadata first so a malformed count fails before any row work
        let indicator = params.restricted_indicator.as_deref();
        if let Some(indicator) = indicator.filter(|i| !i.is_empty()) {
            rs.set_restricted_indicator(indicator);
        }
        let total = total_count(root)?;
        let max_rows = root.has_child(MAXROWS_ELEMENT);
        advance(&mut stage, Stage::MetadataExtracted);

        if root.has_child(DATA_ELEMENT) {
            let rows = self.row_decoder(root)?;
            rs.set_headers(rows.decode_headers(root));
            debug!("{} column headers/fields given", rs.headers().len());
            advance(&mut stage, Stage::HeadersResolved);

            for record in rows.decode_rows(root, rs.headers())? {
                rs.add_record(record);
            }
        } else if let Some(response) = root.child(RETS_RESPONSE_ELEMENT) {
            advance(&mut stage, Stage::HeadersResolved);
            for record in self.decode_rets_response(response)? {
                rs.add_record(record);
            }
        } else if root.has_child(COLUMNS_ELEMENT) {
            // Column layout of a search that matched nothing
            let rows = self.row_decoder(root)?;
            rs.set_headers(rows.decode_headers(root));
            debug!("{} column headers/fields given, no DATA", rs.headers().len());
            advance(&mut stage, Stage::HeadersResolved);
        } else {
            debug!("Response carries neither DATA nor RETS-RESPONSE; no records");
            advance(&mut stage, Stage::HeadersResolved);
        }
        advance(&mut stage, Stage::RecordsDecoded);

        if let Some(total) = total {
            rs.set_total_results_count(total);
            debug!("{total} total results found");
        }
        debug!("{} results given", rs.returned_results_count());

        if max_rows {
            // The server withheld records; callers page on with an Offset
            rs.set_max_rows_reached();
            debug!("Maximum rows returned in response");
        }
        advance(&mut stage, Stage::Done);

        Ok(rs)
    }

    fn row_decoder<N: ResponseNode>(&self, root: &N) -> Result<RowDecoder> {
        let delimiter = resolve_delimiter(root, self.config.default_delimiter)?;
        Ok(RowDecoder::new(delimiter).with_policy(self.config.row_policy))
    }

    /// Decode the records of a RETS-RESPONSE element
    fn decode_rets_response<N: ResponseNode>(&self, response: &N) -> Result<Vec<Record>> {
        let tree = response.to_tree();
        let JsonValue::Object(top) = tree else {
            debug!("RETS-RESPONSE has no child elements; no records");
            return Ok(Vec::new());
        };

        // By convention the first child element is response metadata and
        // the second holds the records, unless configured otherwise
        let selected = match &self.config.record_key {
            Some(key) => top.get_key_value(key.as_str()),
            None => top
                .iter()
                .filter(|(key, _)| {
                    let key = key.as_str();
                    key != self.config.attributes_key && key != ATTRIBUTES_KEY && key != TEXT_KEY
                })
                .nth(1),
        };
        let Some((key, value)) = selected else {
            debug!("RETS-RESPONSE has no record element; no records");
            return Ok(Vec::new());
        };

        match value {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| record_from_node(&self.flattener, key, item))
                .collect(),
            JsonValue::Object(_) => {
                // A single record collapses to an object instead of a list
                Ok(vec![record_from_node(&self.flattener, key, value)?])
            }
            JsonValue::String(text) if text.trim().is_empty() => {
                debug!("RETS-RESPONSE record element '{key}' is empty; no records");
                Ok(Vec::new())
            }
            other => Err(Error::unexpected_shape(
                key.as_str(),
                format!("expected one or more records, found {}", kind(other)),
            )),
        }
    }
}

fn advance(stage: &mut Stage, next: Stage) {
    debug_assert!(next > *stage, "stage {next:?} does not follow {stage:?}");
    trace!(from = ?*stage, to = ?next, "search response assembly");
    *stage = next;
}

/// Read `<COUNT Records="N"/>`
fn total_count<N: ResponseNode>(root: &N) -> Result<Option<u64>> {
    let Some(count) = root.child(COUNT_ELEMENT) else {
        return Ok(None);
    };
    let raw = count.attribute(COUNT_RECORDS).unwrap_or_default();
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::malformed(COUNT_ELEMENT, COUNT_RECORDS, raw))
}
