//! CLI module
//!
//! Command-line interface for decoding saved search responses.
//!
//! # Commands
//!
//! - `decode` - Decode a response and write its records
//! - `summary` - Print counts, headers and the truncation flag only

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, SearchArgs};
pub use runner::Runner;
