//! Arrow conversion for search results
//!
//! Every column is nullable Utf8: the protocol carries no type information
//! at this layer, so values stay text. Nested values (photo lists and the
//! like) are written as JSON text.

use crate::error::Result;
use crate::search::{value_to_text, Results};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use std::sync::Arc;

/// Arrow schema for a result set
///
/// Column order follows [`Results::field_names`].
pub fn results_schema(results: &Results) -> Schema {
    let fields: Vec<Field> = results
        .field_names()
        .into_iter()
        .map(|name| Field::new(name, DataType::Utf8, true))
        .collect();
    Schema::new(fields)
}

/// Convert a result set into a single RecordBatch
///
/// A field missing from a record becomes null; an empty string stays an
/// empty string.
pub fn results_to_arrow(results: &Results) -> Result<RecordBatch> {
    let schema = Arc::new(results_schema(results));

    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| {
            let array: StringArray = results
                .iter()
                .map(|record| record.get(field.name()).map(value_to_text))
                .collect();
            Arc::new(array) as ArrayRef
        })
        .collect();

    // Row count is explicit so a result set without columns still converts
    let options = RecordBatchOptions::new().with_row_count(Some(results.returned_results_count()));
    Ok(RecordBatch::try_new_with_options(schema, columns, &options)?)
}
