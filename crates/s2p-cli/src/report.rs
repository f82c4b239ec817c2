//! Console reporting for conversion results.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde_yaml::Value;

use s2p_model::LINE_KEY;

use crate::types::{BatchResult, FileError, FileOutcome, FileReport};

/// Print per-file blocks and, for multi-file batches, a summary table.
///
/// With `check` set, passing files print nothing and an all-green batch ends
/// with a single confirmation line.
pub fn print_batch(batch: &BatchResult, check: bool) {
    for file in &batch.files {
        match &file.outcome {
            FileOutcome::Converted { schema } => {
                if !check {
                    print_converted(file, schema);
                }
            }
            FileOutcome::Failed { error } => print_failure(file, error),
        }
    }
    if batch.files.len() > 1 {
        print_summary(batch);
    }
    if check && !batch.has_failures() {
        println!("All schemas passed.");
    }
}

fn print_converted(file: &FileReport, schema: &s2p_model::ColumnSchema) {
    println!("Schema: {}", file.path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Polars"),
    ]);
    apply_table_style(&mut table);
    let polars_schema = schema.to_polars();
    for (field, (_, dtype)) in schema.iter().zip(polars_schema.iter()) {
        table.add_row(vec![
            Cell::new(&field.name),
            Cell::new(field.column_type.to_string()),
            Cell::new(dtype.to_string()),
        ]);
    }
    println!("{table}");
}

fn print_failure(file: &FileReport, error: &FileError) {
    println!("Schema: {}", file.path.display());
    match error {
        FileError::Load(error) => {
            println!("The document could not be loaded.");
            println!("{error}");
        }
        FileError::Convert(error) => {
            println!("The document can not be converted.");
            if let Some(line) = error.line() {
                println!("Problematic line: {line}");
            }
            println!("{error}");
            if let Some(fragment) = error.fragment() {
                println!("Problematic definition:");
                print_fragment(fragment);
            }
        }
        FileError::Unify(error) => {
            println!("The converted schemas do not agree.");
            println!("{error}");
        }
        FileError::NoMessages => {
            println!("The document declares no messages; nothing to convert.");
        }
    }
}

fn print_summary(batch: &BatchResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Messages"),
        header_cell("Columns"),
        header_cell("Status"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Center);
    for file in &batch.files {
        let (columns, status) = match &file.outcome {
            FileOutcome::Converted { schema } => (
                Cell::new(schema.len()),
                Cell::new("✓")
                    .fg(Color::Green)
                    .add_attribute(Attribute::Bold),
            ),
            FileOutcome::Failed { .. } => (
                Cell::new("-"),
                Cell::new("✗").fg(Color::Red).add_attribute(Attribute::Bold),
            ),
        };
        table.add_row(vec![
            Cell::new(file.path.display()),
            Cell::new(file.messages),
            columns,
            status,
        ]);
    }
    println!("{table}");
}

/// Render an offending document fragment as indented YAML, without its
/// top-level line annotation.
fn print_fragment(fragment: &Value) {
    let cleaned = strip_line_key(fragment);
    let rendered =
        serde_yaml::to_string(&cleaned).unwrap_or_else(|_| format!("{cleaned:?}\n"));
    for line in rendered.lines() {
        println!("  {line}");
    }
}

fn strip_line_key(fragment: &Value) -> Value {
    match fragment {
        Value::Mapping(map) => Value::Mapping(
            map.iter()
                .filter(|(key, _)| key.as_str() != Some(LINE_KEY))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        other => other.clone(),
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
