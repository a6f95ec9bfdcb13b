//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// RETS search response decoder
#[derive(Parser, Debug)]
#[command(name = "rets-search")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Decoder settings file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// The search a response belongs to
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Saved search response body (XML)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Searched resource (SearchType)
    #[arg(short, long, default_value = "Property")]
    pub resource: String,

    /// Searched class
    #[arg(long)]
    pub class: String,

    /// Restricted-field marker sent with the request
    #[arg(long)]
    pub restricted_indicator: Option<String>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Decode a response and write its records
    Decode {
        #[command(flatten)]
        search: SearchArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file (stdout when omitted; required for parquet)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print counts, headers and the truncation flag
    Summary {
        #[command(flatten)]
        search: SearchArgs,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Whole result set as indented JSON
    Pretty,
    /// CSV with a header line
    Csv,
    /// Parquet file
    Parquet,
}
