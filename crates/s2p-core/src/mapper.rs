//! Primitive type mapping.
//!
//! Maps a field's `(type, format, example)` triple to a [`ColumnType`]. A
//! present, non-empty `format` takes precedence and the declared type is
//! ignored entirely; otherwise the base type table applies.

use serde_yaml::Value;

use s2p_model::{ColumnType, LINE_KEY, TimeUnit};

use crate::error::{ConvertError, Result};

/// Regex literal some generators emit for second-precision wall-clock times.
const TIME_PATTERN: &str = "^([0-1][0-9]|2[0-3]):[0-5][0-9]:[0-5][0-9]Z$";

/// The mapping-relevant parts of one properties entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSpec {
    /// Effective declared type, unions already collapsed.
    pub type_name: Option<String>,
    pub format: Option<String>,
    pub example: Option<Value>,
    /// 1-based source line of the entry, when annotated.
    pub line: Option<u64>,
}

/// Pull the `(type, format, example, line)` quadruple out of a field node.
///
/// A list-typed `type` (the `["string", "null"]` nullable-union idiom)
/// collapses to its first non-`"null"` member; an empty or all-null list
/// leaves the effective type absent.
pub fn extract_field_spec(field: &Value) -> FieldSpec {
    FieldSpec {
        type_name: effective_type(field.get("type")),
        format: field.get("format").and_then(scalar_type_name),
        example: field.get("example").cloned(),
        line: field.get(LINE_KEY).and_then(Value::as_u64),
    }
}

fn effective_type(type_value: Option<&Value>) -> Option<String> {
    match type_value? {
        Value::Sequence(members) => members
            .iter()
            .find(|member| member.as_str() != Some("null"))
            .and_then(scalar_type_name),
        other => scalar_type_name(other),
    }
}

fn scalar_type_name(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(name) => Some(name.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        // malformed type declarations still need a rendering for diagnostics
        other => Some(format!("{other:?}")),
    }
}

/// Map a field spec to its primitive column type.
///
/// `Ok(None)` means the mapper has no definitive answer (a `number` with no
/// usable example); the caller drops such fields from the output.
pub fn map_field_type(spec: &FieldSpec) -> Result<Option<ColumnType>> {
    if let Some(format) = spec.format.as_deref().filter(|format| !format.is_empty()) {
        return map_format(format, spec.line).map(Some);
    }
    map_base_type(spec)
}

fn map_format(format: &str, line: Option<u64>) -> Result<ColumnType> {
    let mapped = match format {
        "int32" => ColumnType::Int32,
        "int64" => ColumnType::Int64,
        "float" => ColumnType::Float32,
        "double" => ColumnType::Float64,
        "byte" | "binary" | "password" => ColumnType::Utf8,
        "date" => ColumnType::Utf8,
        // no native UUID primitive in the columnar model
        "uuid" | "UUID" => ColumnType::Utf8,
        "datetime" | "date-time" => ColumnType::Timestamp(TimeUnit::Milliseconds),
        "datetime[us]" | "date-time[us]" => ColumnType::Timestamp(TimeUnit::Microseconds),
        "datetime[s]" | "date-time[s]" => ColumnType::Timestamp(TimeUnit::Seconds),
        "datetime[ms]" | "date-time[ms]" => ColumnType::Timestamp(TimeUnit::Milliseconds),
        "datetime[ns]" | "date-time[ns]" => ColumnType::Timestamp(TimeUnit::Nanoseconds),
        "time" => ColumnType::Time(TimeUnit::Seconds),
        // time data with this shape is only expressible as text
        TIME_PATTERN => ColumnType::Utf8,
        _ => {
            return Err(ConvertError::UnsupportedFormat {
                format: format.to_string(),
                line,
            });
        }
    };
    Ok(mapped)
}

fn map_base_type(spec: &FieldSpec) -> Result<Option<ColumnType>> {
    let mapped = match spec.type_name.as_deref() {
        None => ColumnType::Null,
        Some("string") => ColumnType::Utf8,
        Some("float") => ColumnType::Float64,
        Some("integer") => ColumnType::Int64,
        Some("boolean") => ColumnType::Boolean,
        // an integer example picks the narrower reading; no usable example
        // leaves the field without a definitive type
        Some("number") => return Ok(number_from_example(spec.example.as_ref())),
        Some(other) => {
            return Err(ConvertError::UnsupportedType {
                type_name: other.to_string(),
                line: spec.line,
            });
        }
    };
    Ok(Some(mapped))
}

fn number_from_example(example: Option<&Value>) -> Option<ColumnType> {
    let example = example?;
    if example.as_i64().is_some() {
        return Some(ColumnType::Int64);
    }
    if example.as_f64().is_some() {
        return Some(ColumnType::Float64);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(type_name: Option<&str>, format: Option<&str>) -> FieldSpec {
        FieldSpec {
            type_name: type_name.map(str::to_owned),
            format: format.map(str::to_owned),
            example: None,
            line: None,
        }
    }

    #[test]
    fn test_format_wins_over_type() {
        let resolved = map_field_type(&spec(Some("integer"), Some("int32"))).unwrap();
        assert_eq!(resolved, Some(ColumnType::Int32));
    }

    #[test]
    fn test_format_table() {
        let cases = [
            ("int64", ColumnType::Int64),
            ("float", ColumnType::Float32),
            ("double", ColumnType::Float64),
            ("byte", ColumnType::Utf8),
            ("binary", ColumnType::Utf8),
            ("password", ColumnType::Utf8),
            ("date", ColumnType::Utf8),
            ("uuid", ColumnType::Utf8),
            ("UUID", ColumnType::Utf8),
            ("date-time", ColumnType::Timestamp(TimeUnit::Milliseconds)),
            ("datetime", ColumnType::Timestamp(TimeUnit::Milliseconds)),
            ("datetime[s]", ColumnType::Timestamp(TimeUnit::Seconds)),
            ("date-time[us]", ColumnType::Timestamp(TimeUnit::Microseconds)),
            ("date-time[ms]", ColumnType::Timestamp(TimeUnit::Milliseconds)),
            ("datetime[ns]", ColumnType::Timestamp(TimeUnit::Nanoseconds)),
            ("time", ColumnType::Time(TimeUnit::Seconds)),
            (TIME_PATTERN, ColumnType::Utf8),
        ];
        for (format, expected) in cases {
            let resolved = map_field_type(&spec(Some("string"), Some(format))).unwrap();
            assert_eq!(resolved, Some(expected), "format {format}");
        }
    }

    #[test]
    fn test_uuid_is_the_only_case_insensitive_format() {
        assert!(map_field_type(&spec(None, Some("Date"))).is_err());
        assert!(map_field_type(&spec(None, Some("DATETIME"))).is_err());
    }

    #[test]
    fn test_unknown_format_carries_the_literal_and_line() {
        let mut field = spec(Some("string"), Some("not-a-real-format"));
        field.line = Some(9);
        match map_field_type(&field).unwrap_err() {
            ConvertError::UnsupportedFormat { format, line } => {
                assert_eq!(format, "not-a-real-format");
                assert_eq!(line, Some(9));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_format_falls_back_to_type() {
        let resolved = map_field_type(&spec(Some("string"), Some(""))).unwrap();
        assert_eq!(resolved, Some(ColumnType::Utf8));
    }

    #[test]
    fn test_type_table() {
        assert_eq!(
            map_field_type(&spec(Some("string"), None)).unwrap(),
            Some(ColumnType::Utf8)
        );
        assert_eq!(
            map_field_type(&spec(Some("float"), None)).unwrap(),
            Some(ColumnType::Float64)
        );
        assert_eq!(
            map_field_type(&spec(Some("integer"), None)).unwrap(),
            Some(ColumnType::Int64)
        );
        assert_eq!(
            map_field_type(&spec(Some("boolean"), None)).unwrap(),
            Some(ColumnType::Boolean)
        );
        assert_eq!(
            map_field_type(&spec(None, None)).unwrap(),
            Some(ColumnType::Null)
        );
    }

    #[test]
    fn test_unknown_type_fails_with_the_type_error() {
        match map_field_type(&spec(Some("tuple"), None)).unwrap_err() {
            ConvertError::UnsupportedType { type_name, .. } => assert_eq!(type_name, "tuple"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_number_disambiguates_by_example_kind() {
        let mut integer = spec(Some("number"), None);
        integer.example = Some(Value::Number(42.into()));
        assert_eq!(map_field_type(&integer).unwrap(), Some(ColumnType::Int64));

        let mut float = spec(Some("number"), None);
        float.example = Some(Value::Number(2.5.into()));
        assert_eq!(map_field_type(&float).unwrap(), Some(ColumnType::Float64));
    }

    #[test]
    fn test_number_without_example_has_no_definitive_type() {
        assert_eq!(map_field_type(&spec(Some("number"), None)).unwrap(), None);
        let mut stringy = spec(Some("number"), None);
        stringy.example = Some(Value::String("3".to_string()));
        assert_eq!(map_field_type(&stringy).unwrap(), None);
    }

    #[test]
    fn test_union_type_resolution() {
        let field: Value = serde_yaml::from_str("type:\n  - 'null'\n  - string\n").unwrap();
        assert_eq!(
            extract_field_spec(&field).type_name.as_deref(),
            Some("string")
        );

        let all_null: Value = serde_yaml::from_str("type:\n  - 'null'\n").unwrap();
        assert_eq!(extract_field_spec(&all_null).type_name, None);
        assert_eq!(
            map_field_type(&extract_field_spec(&all_null)).unwrap(),
            Some(ColumnType::Null)
        );
    }

    #[test]
    fn test_union_takes_the_first_non_null_member() {
        let field: Value =
            serde_yaml::from_str("type:\n  - 'null'\n  - integer\n  - string\n").unwrap();
        assert_eq!(
            extract_field_spec(&field).type_name.as_deref(),
            Some("integer")
        );
    }

    #[test]
    fn test_extract_reads_line_and_example() {
        let field: Value = serde_yaml::from_str(
            "type: number\nformat: ''\nexample: 3\n__line__: 14\n",
        )
        .unwrap();
        let extracted = extract_field_spec(&field);
        assert_eq!(extracted.line, Some(14));
        assert_eq!(extracted.example.and_then(|e| e.as_i64()), Some(3));
    }
}
