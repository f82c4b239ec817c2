//! Airbyte schema preparation.
//!
//! Airbyte emits records wrapped in bookkeeping columns next to the declared
//! stream schema. Preparing a stream's schema attaches those columns so the
//! converted columnar schema matches the data Airbyte actually delivers.

use serde_yaml::{Mapping, Value};

use crate::error::{LoadError, Result};

/// The bookkeeping columns Airbyte attaches to every record.
const AIRBYTE_PROPERTIES: &str = "\
_airbyte_raw_id:
  type: string
_airbyte_generation_id:
  type: integer
_airbyte_meta:
  type: object
  properties:
    changes:
      type: array
      items:
        type: string
    sync_id:
      type: integer
";

/// Wrap a declared stream schema in Airbyte's record envelope.
///
/// The result declares the bookkeeping columns at the top level (with an
/// integer `_airbyte_extracted_at`) and nests the stream's own properties
/// under `_airbyte_data`, where the extraction timestamp arrives as a
/// string. The input schema must declare `type` and `properties`.
pub fn prepare_airbyte_schema(schema: &Value) -> Result<Value> {
    let declared_type = schema
        .get("type")
        .cloned()
        .ok_or(LoadError::MissingAirbyteKey("type"))?;
    let declared_properties = schema
        .get("properties")
        .and_then(Value::as_mapping)
        .cloned()
        .ok_or(LoadError::MissingAirbyteKey("properties"))?;
    let bookkeeping: Mapping = serde_yaml::from_str(AIRBYTE_PROPERTIES)?;

    let mut data_properties = declared_properties;
    extend(&mut data_properties, &bookkeeping);
    insert(
        &mut data_properties,
        "_airbyte_extracted_at",
        type_entry("string"),
    );

    let mut data = Mapping::new();
    insert(&mut data, "type", declared_type);
    insert(&mut data, "properties", Value::Mapping(data_properties));

    let mut properties = bookkeeping;
    insert(&mut properties, "_airbyte_extracted_at", type_entry("integer"));
    insert(&mut properties, "_airbyte_data", Value::Mapping(data));

    let mut prepared = Mapping::new();
    insert(&mut prepared, "type", Value::String("object".to_string()));
    insert(&mut prepared, "properties", Value::Mapping(properties));
    Ok(Value::Mapping(prepared))
}

fn insert(map: &mut Mapping, key: &str, value: Value) {
    map.insert(Value::String(key.to_string()), value);
}

fn extend(map: &mut Mapping, entries: &Mapping) {
    for (key, value) in entries {
        map.insert(key.clone(), value.clone());
    }
}

fn type_entry(type_name: &str) -> Value {
    let mut map = Mapping::new();
    insert(&mut map, "type", Value::String(type_name.to_string()));
    Value::Mapping(map)
}
