//! Conversion of the columnar model into Polars schemas.
//!
//! Polars has no second-resolution `TimeUnit`, so second-precision
//! timestamps widen to milliseconds on conversion; the [`ColumnType`] value
//! keeps the exact unit for consumers that can represent it.

use polars::prelude::{DataType, Field, Schema};

use crate::schema::{ColumnField, ColumnSchema, ColumnType, TimeUnit};

impl TimeUnit {
    /// Closest Polars time unit; seconds widen to milliseconds.
    pub fn to_polars(self) -> polars::prelude::TimeUnit {
        match self {
            Self::Seconds | Self::Milliseconds => polars::prelude::TimeUnit::Milliseconds,
            Self::Microseconds => polars::prelude::TimeUnit::Microseconds,
            Self::Nanoseconds => polars::prelude::TimeUnit::Nanoseconds,
        }
    }
}

impl ColumnType {
    /// Equivalent Polars data type.
    pub fn to_polars(&self) -> DataType {
        match self {
            Self::Int32 => DataType::Int32,
            Self::Int64 => DataType::Int64,
            Self::Float32 => DataType::Float32,
            Self::Float64 => DataType::Float64,
            Self::Boolean => DataType::Boolean,
            Self::Utf8 => DataType::String,
            Self::Timestamp(unit) => DataType::Datetime(unit.to_polars(), None),
            // Polars times are always nanoseconds since midnight
            Self::Time(_) => DataType::Time,
            Self::Null => DataType::Null,
            Self::List(element) => DataType::List(Box::new(element.to_polars())),
            Self::Struct(fields) => {
                DataType::Struct(fields.iter().map(ColumnField::to_polars_field).collect())
            }
        }
    }
}

impl ColumnField {
    /// Equivalent Polars field.
    pub fn to_polars_field(&self) -> Field {
        Field::new(self.name.as_str().into(), self.column_type.to_polars())
    }
}

impl ColumnSchema {
    /// Render the whole schema as a Polars [`Schema`].
    pub fn to_polars(&self) -> Schema {
        let mut schema = Schema::with_capacity(self.len());
        for field in self.fields() {
            schema.with_column(field.name.as_str().into(), field.column_type.to_polars());
        }
        schema
    }
}
