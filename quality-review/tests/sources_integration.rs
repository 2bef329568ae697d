//! Integration tests for profiling CSV and Parquet files.

use std::fs::File;
use std::io::Write;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use quality_review::prelude::*;
use quality_review::sources::{profile_source, CsvOptions, CsvSource, ParquetSource};
use quality_review::test_fixtures::create_customers_batch;
use tempfile::NamedTempFile;

fn write_temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(suffix).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path().to_str().unwrap().to_string()
}

#[tokio::test]
async fn test_csv_end_to_end() {
    let file = write_temp_file(".csv", "id,name\n1,Al\n2,Bo\n,Al\n");
    let source = CsvSource::new(path_of(&file)).unwrap();

    let report = profile_source(&source, &Profiler::new()).await.unwrap();
    assert_eq!(report.len(), 2);

    let id = report.row("id").unwrap();
    assert_eq!(id.data_type, ColumnKind::Integer);
    assert_eq!((id.populated, id.nulls), (2, 1));
    assert_eq!(id.completeness_display(), "66.67%");
    assert_eq!(id.categorical_values.to_string(), "[1, 2]");

    let name = report.row("name").unwrap();
    assert_eq!(name.data_type, ColumnKind::String);
    assert_eq!(name.categorical_values.to_string(), "[Al, Bo]");
    assert_eq!((name.min_string_length, name.max_string_length), (Some(2), Some(2)));
}

#[tokio::test]
async fn test_csv_inferred_kinds() {
    let file = write_temp_file(
        ".csv",
        "amount,joined,code\n-1.5,2024-01-05,A1\n2.25,2023-12-31,B2\n",
    );
    let source = CsvSource::new(path_of(&file)).unwrap();
    let profiler = Profiler::builder()
        .check_negative(true)
        .numeric_only_columns(["code"])
        .build();

    let report = profile_source(&source, &profiler).await.unwrap();

    let amount = report.row("amount").unwrap();
    assert_eq!(amount.data_type, ColumnKind::Decimal);
    assert_eq!(amount.negative_values_test.to_string(), "Fail - 1 neg. values");

    let joined = report.row("joined").unwrap();
    assert_eq!(joined.data_type, ColumnKind::Date);
    assert_eq!(joined.to_strings()[5], "2023-12-31");

    let code = report.row("code").unwrap();
    assert_eq!(code.numeric_only_test.to_string(), "Fail - 2 records");
}

#[tokio::test]
async fn test_tsv_with_explicit_schema() {
    let file = write_temp_file(".tsv", "zip\tcity\n02139\tCambridge\n10001\tNew York\n");
    let schema = Arc::new(Schema::new(vec![
        Field::new("zip", DataType::Utf8, true),
        Field::new("city", DataType::Utf8, true),
    ]));
    let options = CsvOptions {
        delimiter: b'\t',
        schema: Some(schema),
        ..Default::default()
    };
    let source = CsvSource::with_options(path_of(&file), options).unwrap();
    let profiler = Profiler::builder()
        .numeric_only_columns(["zip"])
        .alpha_only_columns(["city"])
        .build();

    let report = profile_source(&source, &profiler).await.unwrap();

    let zip = report.row("zip").unwrap();
    assert_eq!(zip.data_type, ColumnKind::String);
    assert_eq!(zip.numeric_only_test.to_string(), "Pass");
    assert_eq!(zip.categorical_values.to_string(), "[02139, 10001]");

    let city = report.row("city").unwrap();
    assert_eq!(city.alpha_only_test.to_string(), "Pass");
    assert_eq!(city.max_string_length, Some(9));
}

#[tokio::test]
async fn test_parquet_end_to_end() {
    let batch = create_customers_batch().unwrap();
    let file = NamedTempFile::with_suffix(".parquet").unwrap();
    let mut writer =
        ArrowWriter::try_new(File::create(file.path()).unwrap(), batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let source = ParquetSource::new(path_of(&file)).unwrap();
    let from_file = profile_source(&source, &Profiler::new()).await.unwrap();
    let in_memory = Profiler::new().profile(&batch).unwrap();

    assert_eq!(from_file, in_memory);
}

#[tokio::test]
async fn test_unknown_column_from_file_source() {
    let file = write_temp_file(".csv", "id\n1\n");
    let source = CsvSource::new(path_of(&file)).unwrap();
    let profiler = Profiler::builder().alpha_only_columns(["name"]).build();

    let err = profile_source(&source, &profiler).await.unwrap_err();
    assert!(matches!(err, ReviewError::UnknownColumn { .. }));
    assert_eq!(
        err.to_string(),
        "Column 'name' named in alpha_only_columns not found in table"
    );
}

#[tokio::test]
async fn test_missing_parquet_file() {
    let source = ParquetSource::new("/no/such/orders.parquet").unwrap();
    let err = profile_source(&source, &Profiler::new()).await.unwrap_err();
    assert!(matches!(err, ReviewError::DataSource { .. }));
}

#[tokio::test]
async fn test_formatted_file_report() {
    let file = write_temp_file(".csv", "id,name\n1,Al\n2,Bo\n");
    let source = CsvSource::new(path_of(&file)).unwrap();
    let report = profile_source(&source, &Profiler::new()).await.unwrap();

    let markdown = MarkdownFormatter::new().format(&report).unwrap();
    assert!(markdown.contains("| id | integer | 2 | 0 | 100.00% | 1 | 2 |"));

    let json = JsonFormatter::new().with_pretty(false).format(&report).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed[1]["Column Name"], "name");
    assert_eq!(parsed[1]["Minimum String Length"], 2);
}
