//! Row decoding
//!
//! Turns `COLUMNS`/`DATA` lines of the delimited encoding, and flattened
//! RETS-RESPONSE nodes, into [`Record`]s.

use super::flatten::Flattener;
use super::types::RowPolicy;
use crate::error::{Error, Result};
use crate::search::Record;
use crate::types::JsonValue;
use crate::xml::ResponseNode;
use tracing::debug;

/// Element carrying the column names
pub const COLUMNS_ELEMENT: &str = "COLUMNS";

/// Element carrying one data row
pub const DATA_ELEMENT: &str = "DATA";

/// Splits delimited lines and aligns them with the column header
#[derive(Debug, Clone, Copy)]
pub struct RowDecoder {
    delimiter: char,
    policy: RowPolicy,
}

impl RowDecoder {
    /// Create a decoder for the given delimiter character code
    pub fn new(delimiter: u8) -> Self {
        Self {
            delimiter: char::from(delimiter),
            policy: RowPolicy::default(),
        }
    }

    /// Set the short-row policy
    #[must_use]
    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Delimiter character
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Remove one bracketing delimiter from each end, then split
    ///
    /// Only a single delimiter is stripped per side; `"\t\tA\t"` keeps a
    /// leading empty field. An empty line yields one empty field.
    pub fn split_line<'a>(&self, line: &'a str) -> Vec<&'a str> {
        let line = line.strip_prefix(self.delimiter).unwrap_or(line);
        let line = line.strip_suffix(self.delimiter).unwrap_or(line);
        line.split(self.delimiter).collect()
    }

    /// Read the column names from the first `COLUMNS` element
    pub fn decode_headers<N: ResponseNode>(&self, root: &N) -> Vec<String> {
        let columns = root.child_text(COLUMNS_ELEMENT).unwrap_or_else(|| {
            debug!("Response has no COLUMNS element");
            ""
        });
        self.split_line(columns)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Decode one data line against the headers
    ///
    /// `row` is the 1-based position of the line among the `DATA` elements,
    /// used for error reporting. Fields beyond the header count are ignored.
    pub fn decode_row(&self, line: &str, headers: &[String], row: usize) -> Result<Record> {
        let fields = self.split_line(line);

        if fields.len() < headers.len() && self.policy == RowPolicy::Strict {
            return Err(Error::RowFieldMismatch {
                row,
                expected: headers.len(),
                found: fields.len(),
            });
        }

        let mut record = Record::new();
        for (i, name) in headers.iter().enumerate() {
            let value = fields.get(i).copied().unwrap_or_default();
            record.set(name.clone(), value);
        }
        Ok(record)
    }

    /// Decode every `DATA` element in document order
    pub fn decode_rows<N: ResponseNode>(&self, root: &N, headers: &[String]) -> Result<Vec<Record>> {
        root.children(DATA_ELEMENT)
            .into_iter()
            .enumerate()
            .map(|(i, line)| self.decode_row(line.text(), headers, i + 1))
            .collect()
    }
}

/// Convert one RETS-RESPONSE node into a record
///
/// The node is flattened first; its own keys become the field names.
/// `key` names the element the node came from and is only used for errors.
pub fn record_from_node(flattener: &Flattener, key: &str, node: &JsonValue) -> Result<Record> {
    match flattener.flatten(node) {
        JsonValue::Object(fields) => Ok(Record::from(fields)),
        other => Err(Error::unexpected_shape(
            key,
            format!("expected an element with fields, found {}", kind(&other)),
        )),
    }
}

pub(crate) fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(s) if s.is_empty() => "an empty element",
        JsonValue::String(_) => "text",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an element",
    }
}
