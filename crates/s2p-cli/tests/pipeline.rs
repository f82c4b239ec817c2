//! Integration tests driving the conversion pipeline over fixture documents.

use std::path::PathBuf;

use polars::prelude::{DataType, TimeUnit as PolarsTimeUnit};

use s2p_cli::commands::run_convert;
use s2p_cli::types::{FileError, FileOutcome};
use s2p_core::{ConvertError, build_schema, schemas_from_document};
use s2p_ingest::load_document;
use s2p_model::{ColumnField, ColumnSchema, ColumnType, TimeUnit};
use s2p_unify::{UnifyError, unify};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn convert_fixture(name: &str) -> ColumnSchema {
    let doc = load_document(&fixture(name)).unwrap();
    let schemas = schemas_from_document(&doc).unwrap();
    unify(&schemas).unwrap()
}

fn convert_error(name: &str) -> ConvertError {
    let doc = load_document(&fixture(name)).unwrap();
    schemas_from_document(&doc).unwrap_err()
}

#[test]
fn test_simple_event_schema() {
    let schema = convert_fixture("simple_event.yaml");
    assert_eq!(
        schema.fields(),
        &[
            ColumnField::new("firstName", ColumnType::Utf8),
            ColumnField::new("lastName", ColumnType::Utf8),
            ColumnField::new("age", ColumnType::Int64),
        ]
    );
}

#[test]
fn test_simple_json_schema_payload() {
    let doc = load_document(&fixture("simple_schema.json")).unwrap();
    let schema = build_schema(&doc).unwrap();
    assert_eq!(
        schema.fields(),
        &[
            ColumnField::new("firstName", ColumnType::Utf8),
            ColumnField::new("lastName", ColumnType::Utf8),
            ColumnField::new("age", ColumnType::Int64),
        ]
    );
}

#[test]
fn test_complex_schema_with_refs_and_all_of() {
    let schema = convert_fixture("complex_schema.yaml");
    let expected = ColumnSchema::new(vec![
        ColumnField::new(
            "metadata",
            ColumnType::Struct(vec![
                ColumnField::new("operation", ColumnType::Utf8),
                ColumnField::new(
                    "publishedAt",
                    ColumnType::Timestamp(TimeUnit::Milliseconds),
                ),
                ColumnField::new("sampleArray", ColumnType::list(ColumnType::Utf8)),
            ]),
        ),
        ColumnField::new(
            "example",
            ColumnType::Struct(vec![
                ColumnField::new("id", ColumnType::Utf8),
                ColumnField::new("updatedAt", ColumnType::Timestamp(TimeUnit::Nanoseconds)),
                ColumnField::new("enabled", ColumnType::Boolean),
                ColumnField::new(
                    "Configuration",
                    ColumnType::Struct(vec![
                        ColumnField::new("sampleInt", ColumnType::Int64),
                        ColumnField::new("sampleTime", ColumnType::Utf8),
                    ]),
                ),
                ColumnField::new("test-str", ColumnType::Utf8),
            ]),
        ),
    ]);
    assert_eq!(schema, expected);
}

#[test]
fn test_complex_schema_polars_rendering() {
    let schema = convert_fixture("complex_schema.yaml");
    let polars_schema = schema.to_polars();
    assert_eq!(polars_schema.len(), 2);
    let metadata = polars_schema.get("metadata").unwrap();
    match metadata {
        DataType::Struct(fields) => {
            assert_eq!(fields.len(), 3);
            assert_eq!(
                fields[1].dtype(),
                &DataType::Datetime(PolarsTimeUnit::Milliseconds, None)
            );
        }
        other => panic!("expected struct, got {other:?}"),
    }
}

#[test]
fn test_complex_array_schema() {
    let schema = convert_fixture("complex_array_schema.yaml");
    let inner = ColumnType::list(ColumnType::Struct(vec![ColumnField::new(
        "name",
        ColumnType::Utf8,
    )]));
    let expected = ColumnSchema::new(vec![ColumnField::new(
        "data",
        ColumnType::Struct(vec![ColumnField::new(
            "id",
            ColumnType::list(ColumnType::Struct(vec![
                ColumnField::new("name", ColumnType::Utf8),
                ColumnField::new("test_1", inner),
            ])),
        )]),
    )]);
    assert_eq!(schema, expected);
}

#[test]
fn test_missing_items_reports_the_broken_line() {
    let error = convert_error("missing_items.yaml");
    match &error {
        ConvertError::MissingItems { .. } => assert_eq!(error.line(), Some(9)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_unsupported_format_carries_the_literal() {
    let error = convert_error("unsupported_format.yaml");
    match error {
        ConvertError::UnsupportedFormat { format, line } => {
            assert_eq!(format, "not-a-real-format");
            assert_eq!(line, Some(9));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_batch_reports_per_file_outcomes() {
    let paths = [fixture("simple_event.yaml"), fixture("missing_items.yaml")];
    let batch = run_convert(&paths, None).unwrap();
    assert!(batch.has_failures());
    assert_eq!(batch.files.len(), 2);
    assert!(matches!(
        batch.files[0].outcome,
        FileOutcome::Converted { .. }
    ));
    assert!(matches!(
        batch.files[1].outcome,
        FileOutcome::Failed {
            error: FileError::Convert(ConvertError::MissingItems { .. })
        }
    ));
}

#[test]
fn test_metadata_subset_passes() {
    let paths = [fixture("simple_event.yaml")];
    let metadata = fixture("metadata_ok.yaml");
    let batch = run_convert(&paths, Some(metadata.as_path())).unwrap();
    assert!(!batch.has_failures());
}

#[test]
fn test_metadata_missing_column_fails() {
    let paths = [fixture("simple_event.yaml")];
    let metadata = fixture("metadata_missing.yaml");
    let batch = run_convert(&paths, Some(metadata.as_path())).unwrap();
    assert!(batch.has_failures());
    match &batch.files[0].outcome {
        FileOutcome::Failed {
            error: FileError::Unify(UnifyError::MissingMandatoryColumns { columns }),
        } => assert_eq!(columns, &vec!["email".to_string()]),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn test_unreadable_document_is_a_load_failure() {
    let paths = [fixture("does_not_exist.yaml")];
    let batch = run_convert(&paths, None).unwrap();
    assert!(matches!(
        batch.files[0].outcome,
        FileOutcome::Failed {
            error: FileError::Load(_)
        }
    ));
}
