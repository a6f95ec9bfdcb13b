//! Output module
//!
//! Turns a decoded result set into tabular output.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Building an Arrow schema from result set columns
//! - Converting records to an Arrow RecordBatch
//! - Writing Parquet files

mod schema;
mod writer;

pub use schema::{results_schema, results_to_arrow};
pub use writer::{write_batch_to_parquet, ParquetCompression, ParquetWriterConfig};

#[cfg(test)]
mod tests;
