//! Decoder types
//!
//! Named policies for everything the decoder would otherwise do silently:
//! the fallback delimiter, short-row handling and singleton-list repair.

use crate::types::JsonValue;
use crate::xml::ATTRIBUTES_KEY;
use serde::{Deserialize, Serialize};

/// Delimiter assumed when the response carries no `DELIMITER` element (TAB)
pub const DEFAULT_DELIMITER: u8 = 9;

/// What to do with a delimited row that has fewer fields than columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Fill missing trailing fields with empty strings (default)
    #[default]
    Pad,
    /// Fail the whole decode with `RowFieldMismatch`
    Strict,
}

/// A field the protocol declares repeatable
///
/// Generic XML-to-tree conversion turns a list holding exactly one entry
/// into a bare object. Declaring the field here makes the flattener wrap
/// such an object back into a one-element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatableField {
    /// Field (element) name, e.g. "PropertyPhoto"
    pub name: String,

    /// Field that only a single entry carries; when set, an object is only
    /// treated as a lone entry if this key is present
    #[serde(default)]
    pub marker: Option<String>,
}

impl RepeatableField {
    /// Declare a repeatable field
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            marker: None,
        }
    }

    /// Require a marker key before wrapping
    #[must_use]
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Whether `value` is a single collapsed entry of this field
    pub fn is_collapsed_entry(&self, value: &JsonValue) -> bool {
        match value {
            JsonValue::Object(obj) => self.marker.as_ref().map_or(true, |m| obj.contains_key(m)),
            _ => false,
        }
    }
}

/// Configuration for decoding search responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Delimiter character code used when the response does not declare one
    pub default_delimiter: u8,

    /// Short-row handling for the delimited encoding
    pub row_policy: RowPolicy,

    /// Key the XML tree uses to carry element attributes
    pub attributes_key: String,

    /// Fields whose singleton form must be turned back into a list
    pub repeatable_fields: Vec<RepeatableField>,

    /// RETS-RESPONSE child holding the records. When unset, the second
    /// top-level child is used.
    pub record_key: Option<String>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            default_delimiter: DEFAULT_DELIMITER,
            row_policy: RowPolicy::default(),
            attributes_key: ATTRIBUTES_KEY.to_string(),
            repeatable_fields: vec![RepeatableField::new("PropertyPhoto").with_marker("LastUpdated")],
            record_key: None,
        }
    }
}

impl DecoderConfig {
    /// Create a decoder config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short-row policy
    #[must_use]
    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.row_policy = policy;
        self
    }

    /// Fail on short rows instead of padding them
    #[must_use]
    pub fn strict(self) -> Self {
        self.with_row_policy(RowPolicy::Strict)
    }

    /// Set the fallback delimiter
    #[must_use]
    pub fn with_default_delimiter(mut self, delimiter: u8) -> Self {
        self.default_delimiter = delimiter;
        self
    }

    /// Declare an additional repeatable field
    #[must_use]
    pub fn with_repeatable_field(mut self, field: RepeatableField) -> Self {
        self.repeatable_fields.push(field);
        self
    }

    /// Replace all repeatable field declarations
    #[must_use]
    pub fn with_repeatable_fields(mut self, fields: Vec<RepeatableField>) -> Self {
        self.repeatable_fields = fields;
        self
    }

    /// Name the RETS-RESPONSE child that holds the records
    #[must_use]
    pub fn with_record_key(mut self, key: impl Into<String>) -> Self {
        self.record_key = Some(key.into());
        self
    }
}
