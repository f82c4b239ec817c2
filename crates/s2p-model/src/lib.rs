//! Core data model for the schema2polars workspace.
//!
//! This crate defines the columnar type system produced by the conversion
//! pipeline: [`ColumnType`], [`ColumnField`], and [`ColumnSchema`], together
//! with the bridge into Polars schemas.

pub mod polars;
pub mod schema;

/// Reserved mapping key carrying the 1-based source line of the mapping.
///
/// The loader injects this key into every YAML mapping for diagnostics.
/// Schema interpretation must skip it wherever mapping entries are iterated.
pub const LINE_KEY: &str = "__line__";

pub use schema::{ColumnField, ColumnSchema, ColumnType, TimeUnit};
