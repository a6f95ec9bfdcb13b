//! Tests for output module

use super::*;
use crate::search::SearchParser;
use crate::types::SearchParameters;
use arrow::array::{Array, StringArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use std::fs::File;
use tempfile::tempdir;

fn decode(xml: &str) -> crate::search::Results {
    SearchParser::new()
        .parse_str(xml, &SearchParameters::new("Property", "RES"))
        .unwrap()
}

fn column<'a>(batch: &'a arrow::record_batch::RecordBatch, name: &str) -> &'a StringArray {
    batch
        .column_by_name(name)
        .unwrap()
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap()
}

// ============================================================================
// Arrow Conversion Tests
// ============================================================================

#[test]
fn test_results_schema_follows_headers() {
    let rs = decode("<RETS><COLUMNS>\tId\tPrice\tCity\t</COLUMNS><DATA>\t1\t2\t3\t</DATA></RETS>");

    let schema = results_schema(&rs);
    let names: Vec<&String> = schema.fields().iter().map(|f| f.name()).collect();
    assert_eq!(names, vec!["Id", "Price", "City"]);
    assert!(schema
        .fields()
        .iter()
        .all(|f| f.data_type() == &DataType::Utf8 && f.is_nullable()));
}

#[test]
fn test_results_to_arrow_delimited() {
    let rs = decode(
        "<RETS><COLUMNS>\tId\tCity\t</COLUMNS><DATA>\t1\tSpringfield\t</DATA><DATA>\t2\t\t</DATA></RETS>",
    );

    let batch = results_to_arrow(&rs).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 2);

    let city = column(&batch, "City");
    assert_eq!(city.value(0), "Springfield");
    assert!(!city.is_null(1));
    assert_eq!(city.value(1), "");
}

#[test]
fn test_results_to_arrow_xml_missing_fields_are_null() {
    let rs = decode(
        r#"<RETS><RETS-RESPONSE>
  <Pagination/>
  <Listing><Id>1</Id><Price>5</Price></Listing>
  <Listing><Id>2</Id><City>X</City></Listing>
</RETS-RESPONSE></RETS>"#,
    );

    let batch = results_to_arrow(&rs).unwrap();
    assert_eq!(batch.num_columns(), 3);

    let price = column(&batch, "Price");
    assert_eq!(price.value(0), "5");
    assert!(price.is_null(1));
}

#[test]
fn test_results_to_arrow_nested_value_as_json() {
    let rs = decode(
        r#"<RETS><RETS-RESPONSE>
  <Pagination/>
  <Listing><Id>1</Id><PropertyPhoto LastUpdated="t"><MediaURL>u</MediaURL></PropertyPhoto></Listing>
</RETS-RESPONSE></RETS>"#,
    );

    let batch = results_to_arrow(&rs).unwrap();
    let photos = column(&batch, "PropertyPhoto");
    assert_eq!(photos.value(0), r#"[{"MediaURL":"u","LastUpdated":"t"}]"#);
}

#[test]
fn test_results_to_arrow_empty() {
    let rs = decode(r#"<RETS><COUNT Records="0"/></RETS>"#);

    let batch = results_to_arrow(&rs).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 0);
}

// ============================================================================
// Parquet Writer Config Tests
// ============================================================================

#[test]
fn test_parquet_config_default() {
    let config = ParquetWriterConfig::default();
    assert_eq!(config.compression, ParquetCompression::Snappy);
    assert_eq!(config.row_group_size, 1024 * 1024);
}

#[test]
fn test_parquet_config_builders() {
    let config = ParquetWriterConfig::new()
        .with_compression(ParquetCompression::Zstd)
        .with_row_group_size(500);
    assert_eq!(config.compression, ParquetCompression::Zstd);
    assert_eq!(config.row_group_size, 500);
}

#[test]
fn test_parquet_compression_mapping() {
    assert_eq!(
        Compression::from(ParquetCompression::None),
        Compression::UNCOMPRESSED
    );
    assert_eq!(
        Compression::from(ParquetCompression::Snappy),
        Compression::SNAPPY
    );
}

#[test]
fn test_parquet_compression_serde() {
    let codec: ParquetCompression = serde_yaml::from_str("zstd").unwrap();
    assert_eq!(codec, ParquetCompression::Zstd);
}

// ============================================================================
// Parquet Writer Tests
// ============================================================================

#[test]
fn test_write_batch_to_parquet() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("listings.parquet");

    let rs = decode(
        "<RETS><COLUMNS>\tId\tCity\t</COLUMNS><DATA>\t1\tA\t</DATA><DATA>\t2\tB\t</DATA><DATA>\t3\tC\t</DATA></RETS>",
    );
    let batch = results_to_arrow(&rs).unwrap();

    let rows = write_batch_to_parquet(&path, &batch, &ParquetWriterConfig::default()).unwrap();
    assert_eq!(rows, 3);
    assert!(path.exists());

    let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap())
        .unwrap()
        .build()
        .unwrap();
    let total: usize = reader.map(|b| b.unwrap().num_rows()).sum();
    assert_eq!(total, 3);
}

#[test]
fn test_write_batch_to_parquet_bad_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.parquet");

    let rs = decode("<RETS><COLUMNS>\tId\t</COLUMNS><DATA>\t1\t</DATA></RETS>");
    let batch = results_to_arrow(&rs).unwrap();

    let err = write_batch_to_parquet(&path, &batch, &ParquetWriterConfig::default()).unwrap_err();
    assert!(matches!(err, crate::Error::Output { .. }));
}
