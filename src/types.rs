//! Common types used throughout rets-search
//!
//! This module contains shared type definitions, type aliases,
//! and the request-side parameters the decoder needs to label a result set.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type (insertion ordered)
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Generic key-value map with string keys and values
pub type StringMap = HashMap<String, String>;

// ============================================================================
// Search Parameters
// ============================================================================

/// Request parameter naming the searched resource
pub const PARAM_SEARCH_TYPE: &str = "SearchType";

/// Request parameter naming the searched class
pub const PARAM_CLASS: &str = "Class";

/// Request parameter carrying the restricted-field marker
pub const PARAM_RESTRICTED_INDICATOR: &str = "RestrictedIndicator";

/// Parameters of the search request whose response is being decoded
///
/// Only `SearchType`, `Class` and `RestrictedIndicator` influence decoding.
/// Everything else the request carried (`Query`, `Limit`, `Offset`, ...) is
/// kept in `extra` so callers can hand the same map back to their transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    /// Resource name (e.g., "Property")
    #[serde(rename = "SearchType")]
    pub search_type: String,

    /// Class name within the resource (e.g., "RES")
    #[serde(rename = "Class")]
    pub class: String,

    /// Marker the server substitutes for values the user may not see
    #[serde(
        rename = "RestrictedIndicator",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub restricted_indicator: Option<String>,

    /// Remaining request parameters, untouched
    #[serde(flatten)]
    pub extra: StringMap,
}

impl SearchParameters {
    /// Create parameters for a resource and class
    pub fn new(search_type: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            search_type: search_type.into(),
            class: class.into(),
            restricted_indicator: None,
            extra: StringMap::new(),
        }
    }

    /// Set the restricted indicator
    #[must_use]
    pub fn with_restricted_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.restricted_indicator = Some(indicator.into());
        self
    }

    /// Add an extra request parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build parameters from a raw request map
    ///
    /// Fails when `SearchType` or `Class` is absent. An empty
    /// `RestrictedIndicator` is treated as not given.
    pub fn from_map(params: &StringMap) -> Result<Self> {
        let search_type = params
            .get(PARAM_SEARCH_TYPE)
            .cloned()
            .ok_or_else(|| Error::missing_parameter(PARAM_SEARCH_TYPE))?;
        let class = params
            .get(PARAM_CLASS)
            .cloned()
            .ok_or_else(|| Error::missing_parameter(PARAM_CLASS))?;
        let restricted_indicator = params.get(PARAM_RESTRICTED_INDICATOR).cloned();

        let extra = params
            .iter()
            .filter(|(k, _)| {
                !matches!(
                    k.as_str(),
                    PARAM_SEARCH_TYPE | PARAM_CLASS | PARAM_RESTRICTED_INDICATOR
                )
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Ok(Self {
            search_type,
            class,
            restricted_indicator: restricted_indicator.none_if_empty(),
            extra,
        })
    }

    /// Look up any request parameter by its protocol name
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            PARAM_SEARCH_TYPE => Some(&self.search_type),
            PARAM_CLASS => Some(&self.class),
            PARAM_RESTRICTED_INDICATOR => self.restricted_indicator.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}

impl OptionStringExt for String {
    fn none_if_empty(self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}
