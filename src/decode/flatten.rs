//! Attribute flattening
//!
//! Normalizes the generic tree produced from a RETS-RESPONSE element:
//! attribute wrappers are merged into their parent and declared repeatable
//! fields that collapsed to a single object are turned back into lists.

use super::types::{DecoderConfig, RepeatableField};
use crate::types::{JsonObject, JsonValue};
use crate::xml::ATTRIBUTES_KEY;

/// Pure, bottom-up tree normalizer
#[derive(Debug, Clone)]
pub struct Flattener {
    attributes_key: String,
    repeatable_fields: Vec<RepeatableField>,
}

impl Default for Flattener {
    fn default() -> Self {
        Self::from_config(&DecoderConfig::default())
    }
}

impl Flattener {
    /// Create a flattener with no repeatable fields declared
    pub fn new() -> Self {
        Self {
            attributes_key: ATTRIBUTES_KEY.to_string(),
            repeatable_fields: Vec::new(),
        }
    }

    /// Create a flattener from decoder settings
    pub fn from_config(config: &DecoderConfig) -> Self {
        Self {
            attributes_key: config.attributes_key.clone(),
            repeatable_fields: config.repeatable_fields.clone(),
        }
    }

    /// Declare a repeatable field
    #[must_use]
    pub fn with_repeatable_field(mut self, field: RepeatableField) -> Self {
        self.repeatable_fields.push(field);
        self
    }

    /// Flatten a tree, returning a new one
    pub fn flatten(&self, node: &JsonValue) -> JsonValue {
        match node {
            JsonValue::Object(obj) => JsonValue::Object(self.flatten_object(obj)),
            JsonValue::Array(items) => {
                JsonValue::Array(items.iter().map(|item| self.flatten(item)).collect())
            }
            other => other.clone(),
        }
    }

    fn flatten_object(&self, obj: &JsonObject) -> JsonObject {
        let mut out = JsonObject::new();
        let mut attributes = None;

        for (key, value) in obj {
            if *key == self.attributes_key {
                attributes = Some(value);
                continue;
            }
            let value = self.normalize_repeatable(key, self.flatten(value));
            out.insert(key.clone(), value);
        }

        // Attributes land after the children and win on a name clash
        if let Some(JsonValue::Object(attrs)) = attributes {
            for (key, value) in attrs {
                out.insert(key.clone(), value.clone());
            }
        }

        out
    }

    /// Wrap a collapsed single entry of a repeatable field into a list
    pub fn normalize_repeatable(&self, key: &str, value: JsonValue) -> JsonValue {
        let collapsed = self
            .repeatable_fields
            .iter()
            .any(|field| field.name == key && field.is_collapsed_entry(&value));

        if collapsed {
            JsonValue::Array(vec![value])
        } else {
            value
        }
    }
}
