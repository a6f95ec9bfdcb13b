//! Configuration loading
//!
//! Decoder and output settings can be kept in a YAML file:
//!
//! ```yaml
//! decoder:
//!   default_delimiter: 9
//!   row_policy: strict
//!   repeatable_fields:
//!     - name: PropertyPhoto
//!       marker: LastUpdated
//!     - name: OpenHouse
//!   record_key: PropertyDetails
//! output:
//!   compression: zstd
//! ```
//!
//! Every key is optional; missing keys take the defaults of
//! [`DecoderConfig`] and [`ParquetWriterConfig`].

use crate::decode::DecoderConfig;
use crate::error::{Error, Result};
use crate::output::ParquetWriterConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete settings loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Response decoding settings
    pub decoder: DecoderConfig,

    /// Parquet output settings
    pub output: ParquetWriterConfig,
}

/// Load settings from a YAML file
pub fn load_config(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {e}",
                path.display()
            ))
        }
    })?;
    load_config_from_str(&content)
}

/// Load settings from a YAML string
pub fn load_config_from_str(yaml: &str) -> Result<Config> {
    // An empty file is a valid, all-default config
    if yaml.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml::from_str(yaml)
        .map_err(|e| Error::config(format!("Failed to parse config YAML: {e}")))?;

    validate_config(&config)?;
    Ok(config)
}

/// Validate loaded settings
fn validate_config(config: &Config) -> Result<()> {
    let decoder = &config.decoder;

    if decoder.attributes_key.is_empty() {
        return Err(Error::invalid_value(
            "decoder.attributes_key",
            "cannot be empty",
        ));
    }

    if !decoder.default_delimiter.is_ascii() {
        return Err(Error::invalid_value(
            "decoder.default_delimiter",
            format!("{} is not an ASCII character code", decoder.default_delimiter),
        ));
    }

    for (i, field) in decoder.repeatable_fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(Error::invalid_value(
                format!("decoder.repeatable_fields[{i}].name"),
                "cannot be empty",
            ));
        }
        if field.marker.as_deref() == Some("") {
            return Err(Error::invalid_value(
                format!("decoder.repeatable_fields[{i}].marker"),
                "cannot be empty",
            ));
        }
    }

    if decoder.record_key.as_deref() == Some("") {
        return Err(Error::invalid_value("decoder.record_key", "cannot be empty"));
    }

    if config.output.row_group_size == 0 {
        return Err(Error::invalid_value(
            "output.row_group_size",
            "must be greater than zero",
        ));
    }

    Ok(())
}
