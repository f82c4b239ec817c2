//! Error types for schema conversion.
//!
//! Every variant carries enough structured context (source line and/or the
//! offending document fragment) for a caller to point at the exact location.
//! Conversion aborts at the first error; no partial schema is ever returned
//! alongside one.

use serde_yaml::Value;
use thiserror::Error;

use s2p_model::LINE_KEY;

/// Errors from converting a schema document to a columnar schema.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConvertError {
    /// A `$ref` pointer did not resolve to any node.
    #[error("reference '{pointer}' does not resolve to any node")]
    BrokenPointer {
        /// The full pointer string, e.g. `#/components/schemas/Event`.
        pointer: String,
    },

    /// Reference rewriting kept changing the document without reaching a
    /// fixed point; the document contains a reference cycle.
    #[error("references did not stabilize after {passes} passes")]
    ReferenceCycle {
        /// Number of rewrite passes attempted.
        passes: usize,
    },

    /// An extracted message definition has no `payload`.
    #[error("message definition has no 'payload'")]
    MissingPayload {
        /// The message node missing its payload.
        fragment: Value,
    },

    /// An object schema declares neither `properties` nor
    /// `additionalProperties.properties`.
    #[error("object schema does not define its contents via 'properties'")]
    MissingProperties {
        /// The incomplete object schema.
        fragment: Value,
    },

    /// An array schema has no `items` sub-schema.
    #[error("array schema does not define its contents via 'items'")]
    MissingItems {
        /// The incomplete array schema.
        fragment: Value,
    },

    /// A `format` value outside the known format table.
    #[error("unsupported format: {format}")]
    UnsupportedFormat {
        /// The format string that failed to map.
        format: String,
        /// 1-based source line, when the loader annotated one.
        line: Option<u64>,
    },

    /// A `type` value outside the known type table.
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// The type string that failed to map.
        type_name: String,
        /// 1-based source line, when the loader annotated one.
        line: Option<u64>,
    },

    /// Two `allOf` members contribute the same field name to one struct.
    #[error("duplicate field name '{name}' in allOf composition")]
    DuplicateField {
        /// The colliding field name.
        name: String,
        /// 1-based source line of the re-declaration, when annotated.
        line: Option<u64>,
    },
}

impl ConvertError {
    /// The 1-based source line this error points at, when known.
    ///
    /// Fragment-carrying variants read the fragment's `__line__` annotation.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::UnsupportedFormat { line, .. }
            | Self::UnsupportedType { line, .. }
            | Self::DuplicateField { line, .. } => *line,
            Self::MissingPayload { fragment }
            | Self::MissingProperties { fragment }
            | Self::MissingItems { fragment } => fragment_line(fragment),
            Self::BrokenPointer { .. } | Self::ReferenceCycle { .. } => None,
        }
    }

    /// The offending document fragment, for variants that carry one.
    pub fn fragment(&self) -> Option<&Value> {
        match self {
            Self::MissingPayload { fragment }
            | Self::MissingProperties { fragment }
            | Self::MissingItems { fragment } => Some(fragment),
            _ => None,
        }
    }
}

/// Read a fragment's `__line__` annotation.
pub(crate) fn fragment_line(fragment: &Value) -> Option<u64> {
    fragment.get(LINE_KEY).and_then(Value::as_u64)
}

/// Result type alias for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_accessor_reads_fragment_annotation() {
        let fragment: Value = serde_yaml::from_str("__line__: 7\ntype: array\n").unwrap();
        let error = ConvertError::MissingItems { fragment };
        assert_eq!(error.line(), Some(7));
        assert!(error.fragment().is_some());
    }

    #[test]
    fn test_line_accessor_on_direct_variants() {
        let error = ConvertError::UnsupportedFormat {
            format: "not-a-real-format".to_string(),
            line: Some(12),
        };
        assert_eq!(error.line(), Some(12));
        assert!(error.fragment().is_none());
    }
}
