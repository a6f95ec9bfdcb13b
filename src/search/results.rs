//! Search result set and records

use crate::error::Result;
use crate::types::{JsonObject, JsonValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Record
// ============================================================================

/// One listing: field name to value
///
/// Values from the delimited encoding are always strings. Values from the
/// RETS-RESPONSE encoding are strings for leaf elements and lists/objects
/// for nested structures such as photo lists. Typing (numbers, dates) is
/// left to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: JsonObject,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Field value
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.fields.get(name)
    }

    /// Field value when it is a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(JsonValue::as_str)
    }

    /// Whether the field exists
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Field names in insertion order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    /// Iterate over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.fields.iter()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the field's value is the server's restricted marker
    pub fn is_restricted(&self, name: &str, indicator: Option<&str>) -> bool {
        match (indicator, self.get_str(name)) {
            (Some(indicator), Some(value)) => value == indicator,
            _ => false,
        }
    }

    /// Borrow the fields as a JSON object
    pub fn as_object(&self) -> &JsonObject {
        &self.fields
    }

    /// Convert into a JSON object
    pub fn into_object(self) -> JsonObject {
        self.fields
    }
}

impl From<JsonObject> for Record {
    fn from(fields: JsonObject) -> Self {
        Self { fields }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Decoded search response
///
/// Built by [`SearchParser`](super::SearchParser) and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    resource: String,
    class: String,
    headers: Vec<String>,
    records: Vec<Record>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_results_count: Option<u64>,
    max_rows_reached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    restricted_indicator: Option<String>,
}

impl Results {
    pub(crate) fn new(resource: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            class: class.into(),
            ..Default::default()
        }
    }

    pub(crate) fn set_headers(&mut self, headers: Vec<String>) {
        debug_assert!(self.headers.is_empty(), "headers are set once");
        self.headers = headers;
    }

    pub(crate) fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub(crate) fn set_total_results_count(&mut self, count: u64) {
        self.total_results_count = Some(count);
    }

    pub(crate) fn set_max_rows_reached(&mut self) {
        self.max_rows_reached = true;
    }

    pub(crate) fn set_restricted_indicator(&mut self, indicator: impl Into<String>) {
        self.restricted_indicator = Some(indicator.into());
    }

    /// Searched resource
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Searched class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Column names of the delimited encoding (empty for RETS-RESPONSE)
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Records in response order
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Total matches reported by the server, if it sent a count
    pub fn total_results_count(&self) -> Option<u64> {
        self.total_results_count
    }

    /// Number of records actually present
    pub fn returned_results_count(&self) -> usize {
        self.records.len()
    }

    /// Whether the server withheld rows (MAXROWS)
    pub fn is_max_rows_reached(&self) -> bool {
        self.max_rows_reached
    }

    /// Restricted-field marker supplied with the request
    pub fn restricted_indicator(&self) -> Option<&str> {
        self.restricted_indicator.as_deref()
    }

    /// Whether a record's field holds the restricted marker
    pub fn is_restricted(&self, record: &Record, field: &str) -> bool {
        record.is_restricted(field, self.restricted_indicator())
    }

    /// Column names for tabular output
    ///
    /// The headers when present, otherwise every field name seen across
    /// records in first-seen order. Duplicates are dropped.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let candidates: Box<dyn Iterator<Item = &str> + '_> = if self.headers.is_empty() {
            Box::new(self.records.iter().flat_map(|r| r.fields.keys().map(String::as_str)))
        } else {
            Box::new(self.headers.iter().map(String::as_str))
        };
        for name in candidates {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Record at a position
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// First record
    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    /// Last record
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Whether no records were returned
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Non-empty, unrestricted values of one field across all records
    pub fn lists(&self, field: &str) -> Vec<&JsonValue> {
        self.records
            .iter()
            .filter(|r| !self.is_restricted(r, field))
            .filter_map(|r| r.get(field))
            .filter(|v| !matches!(v, JsonValue::Null) && v.as_str() != Some(""))
            .collect()
    }

    /// Index records by the string value of one field
    ///
    /// Records without that field are skipped; a later record wins over an
    /// earlier one with the same key.
    pub fn keyed_by(&self, field: &str) -> HashMap<&str, &Record> {
        self.records
            .iter()
            .filter_map(|r| r.get_str(field).map(|key| (key, r)))
            .collect()
    }

    /// Records as a JSON array string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// Records as CSV with a header line
    pub fn to_csv(&self) -> String {
        let names = self.field_names();
        let mut out = String::new();

        out.push_str(&csv_line(names.iter().map(|n| (*n).to_string())));
        for record in &self.records {
            let values = names
                .iter()
                .map(|name| record.get(name).map(value_to_text).unwrap_or_default());
            out.push_str(&csv_line(values));
        }
        out
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl IntoIterator for Results {
    type Item = Record;
    type IntoIter = std::vec::IntoIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// Text form of a field value: strings as-is, nested values as JSON
pub(crate) fn value_to_text(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

fn csv_line(values: impl Iterator<Item = String>) -> String {
    let mut line = values
        .map(|v| {
            if v.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v
            }
        })
        .collect::<Vec<_>>()
        .join(",");
    line.push('\n');
    line
}
