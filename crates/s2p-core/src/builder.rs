//! Recursive descent from a schema node to an ordered field list.
//!
//! Objects become structs, arrays become lists of primitives or structs, and
//! `allOf` members merge their fields into a single struct in member order.
//! Field order always follows the declaration order of the source
//! properties.

use serde_yaml::Value;
use tracing::trace;

use s2p_model::{ColumnField, ColumnSchema, ColumnType, LINE_KEY};

use crate::error::{ConvertError, Result, fragment_line};
use crate::mapper::{extract_field_spec, map_field_type};

/// Convert a message payload node into a columnar schema.
pub fn build_schema(payload: &Value) -> Result<ColumnSchema> {
    Ok(ColumnSchema::new(build_fields(payload)?))
}

/// Convert a schema node into its ordered list of typed fields.
///
/// A field whose type cannot be determined (a `number` with no usable
/// example) is dropped from the output; this lenient behavior is part of the
/// conversion contract. Every other failure aborts with an error.
pub fn build_fields(node: &Value) -> Result<Vec<ColumnField>> {
    let mut fields: Vec<ColumnField> = Vec::new();
    for source in property_sources(node) {
        let properties = locate_properties(source)?;
        for (key, field_node) in properties {
            let Some(name) = key.as_str() else {
                continue;
            };
            if name == LINE_KEY {
                continue;
            }
            let Some(column_type) = build_field_type(field_node)? else {
                trace!(field = name, "field dropped: no definitive type");
                continue;
            };
            if fields.iter().any(|existing| existing.name == name) {
                return Err(ConvertError::DuplicateField {
                    name: name.to_string(),
                    line: fragment_line(field_node),
                });
            }
            fields.push(ColumnField::new(name, column_type));
        }
    }
    Ok(fields)
}

/// The schemas contributing properties: the `allOf` members when present,
/// otherwise the node itself.
fn property_sources(node: &Value) -> Vec<&Value> {
    match node.get("allOf").and_then(Value::as_sequence) {
        Some(members) => members.iter().collect(),
        None => vec![node],
    }
}

/// Locate a source schema's field map via `properties`, falling back to
/// `additionalProperties.properties`.
fn locate_properties(source: &Value) -> Result<&serde_yaml::Mapping> {
    source
        .get("properties")
        .or_else(|| {
            source
                .get("additionalProperties")
                .and_then(|extra| extra.get("properties"))
        })
        .and_then(Value::as_mapping)
        .ok_or_else(|| ConvertError::MissingProperties {
            fragment: source.clone(),
        })
}

/// Resolve one field's column type, or `None` when the field is dropped.
fn build_field_type(field_node: &Value) -> Result<Option<ColumnType>> {
    let spec = extract_field_spec(field_node);
    match spec.type_name.as_deref() {
        Some("array") => build_array_type(field_node),
        Some("object") => Ok(Some(ColumnType::Struct(build_fields(field_node)?))),
        // composition-by-merge applies regardless of the declared type
        _ if field_node.get("allOf").is_some() => {
            Ok(Some(ColumnType::Struct(build_fields(field_node)?)))
        }
        _ => map_field_type(&spec),
    }
}

fn build_array_type(field_node: &Value) -> Result<Option<ColumnType>> {
    let Some(items) = field_node.get("items") else {
        return Err(ConvertError::MissingItems {
            fragment: field_node.clone(),
        });
    };
    if items_are_objects(items) {
        let fields = build_fields(items)?;
        return Ok(Some(ColumnType::list(ColumnType::Struct(fields))));
    }
    let element = map_field_type(&extract_field_spec(items))?;
    Ok(element.map(ColumnType::list))
}

/// True when the items' declared type is `object` or a union containing it.
fn items_are_objects(items: &Value) -> bool {
    match items.get("type") {
        Some(Value::String(name)) => name == "object",
        Some(Value::Sequence(members)) => {
            members.iter().any(|member| member.as_str() == Some("object"))
        }
        _ => false,
    }
}
