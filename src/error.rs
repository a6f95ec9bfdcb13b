//! Error types for rets-search
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for rets-search
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Response Decoding Errors
    // ============================================================================
    #[error("XML parsing error: {message}")]
    XmlParse { message: String },

    #[error("Malformed {element} metadata: attribute '{attribute}' has value '{value}'")]
    MalformedMetadata {
        element: String,
        attribute: String,
        value: String,
    },

    #[error("Row {row} has {found} fields but {expected} columns were declared")]
    RowFieldMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Missing required search parameter: {name}")]
    MissingParameter { name: String },

    #[error("Unexpected shape under RETS-RESPONSE key '{key}': {message}")]
    UnexpectedShape { key: String, message: String },

    // ============================================================================
    // Arrow/Parquet Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an XML parse error
    pub fn xml(message: impl Into<String>) -> Self {
        Self::XmlParse {
            message: message.into(),
        }
    }

    /// Create a malformed metadata error
    pub fn malformed(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::MalformedMetadata {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Create a missing search parameter error
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    /// Create an unexpected shape error
    pub fn unexpected_shape(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Whether the error was caused by the server's response body rather than
    /// by local configuration or I/O
    pub fn is_response_error(&self) -> bool {
        matches!(
            self,
            Error::XmlParse { .. }
                | Error::MalformedMetadata { .. }
                | Error::RowFieldMismatch { .. }
                | Error::UnexpectedShape { .. }
        )
    }
}

/// Result type alias for rets-search
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::malformed("COUNT", "Records", "many");
        assert_eq!(
            err.to_string(),
            "Malformed COUNT metadata: attribute 'Records' has value 'many'"
        );

        let err = Error::RowFieldMismatch {
            row: 2,
            expected: 5,
            found: 3,
        };
        assert_eq!(
            err.to_string(),
            "Row 2 has 3 fields but 5 columns were declared"
        );

        let err = Error::missing_parameter("SearchType");
        assert_eq!(
            err.to_string(),
            "Missing required search parameter: SearchType"
        );
    }

    #[test]
    fn test_is_response_error() {
        assert!(Error::xml("bad").is_response_error());
        assert!(Error::malformed("DELIMITER", "value", "x").is_response_error());
        assert!(Error::unexpected_shape("Listing", "scalar").is_response_error());

        assert!(!Error::config("test").is_response_error());
        assert!(!Error::missing_parameter("Class").is_response_error());
        assert!(!Error::output("disk").is_response_error());
    }

    #[test]
    fn test_from_anyhow() {
        let err: Error = anyhow::anyhow!("upstream failure").into();
        assert_eq!(err.to_string(), "upstream failure");
        assert!(!err.is_response_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
