//! Columnar schema unification.
//!
//! Merges the per-message schemas of one document into a single table schema
//! and verifies that a built schema covers a set of mandatory columns. A
//! column appearing in several schemas must have the same type everywhere;
//! conflicts fail visibly instead of being widened or dropped.

use thiserror::Error;

use s2p_model::{ColumnField, ColumnSchema, ColumnType};

/// Errors from unifying or comparing columnar schemas.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UnifyError {
    /// The same column name appears with two different types.
    #[error("column '{name}' has conflicting types: {left} vs {right}")]
    ConflictingColumn {
        /// The colliding column name.
        name: String,
        /// Type seen first.
        left: ColumnType,
        /// Type seen later.
        right: ColumnType,
    },

    /// A schema does not contain every mandatory column.
    #[error("missing mandatory columns: {}", .columns.join(", "))]
    MissingMandatoryColumns {
        /// Names of the mandatory columns that are absent or mistyped.
        columns: Vec<String>,
    },
}

/// Result type alias for unification operations.
pub type Result<T> = std::result::Result<T, UnifyError>;

/// Merge schemas into the logical union of their columns.
///
/// Columns keep first-seen order; a column re-appearing with an equal type is
/// merged, re-appearing with a different type is a
/// [`UnifyError::ConflictingColumn`].
pub fn unify(schemas: &[ColumnSchema]) -> Result<ColumnSchema> {
    let mut fields: Vec<ColumnField> = Vec::new();
    for schema in schemas {
        for field in schema.fields() {
            match fields.iter().find(|existing| existing.name == field.name) {
                None => fields.push(field.clone()),
                Some(existing) if existing.column_type == field.column_type => {}
                Some(existing) => {
                    return Err(UnifyError::ConflictingColumn {
                        name: field.name.clone(),
                        left: existing.column_type.clone(),
                        right: field.column_type.clone(),
                    });
                }
            }
        }
    }
    Ok(ColumnSchema::new(fields))
}

/// True when every required column exists in `actual` with an equal type.
pub fn is_subset_of(required: &ColumnSchema, actual: &ColumnSchema) -> bool {
    required.iter().all(|req| {
        actual
            .field(&req.name)
            .is_some_and(|found| found.column_type == req.column_type)
    })
}

/// Enforce that `actual` contains at least the mandatory columns.
///
/// Failure lists every mandatory column that is absent or has a different
/// type, in the mandatory schema's order.
pub fn verify_mandatory(required: &ColumnSchema, actual: &ColumnSchema) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|req| {
            actual
                .field(&req.name)
                .is_none_or(|found| found.column_type != req.column_type)
        })
        .map(|req| req.name.clone())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(UnifyError::MissingMandatoryColumns { columns: missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(fields: &[(&str, ColumnType)]) -> ColumnSchema {
        ColumnSchema::new(
            fields
                .iter()
                .map(|(name, column_type)| ColumnField::new(*name, column_type.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_union_keeps_first_seen_order() {
        let left = schema(&[("a", ColumnType::Utf8), ("b", ColumnType::Int64)]);
        let right = schema(&[("b", ColumnType::Int64), ("c", ColumnType::Boolean)]);
        let unified = unify(&[left, right]).unwrap();
        let names: Vec<&str> = unified.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_conflicting_types_fail_visibly() {
        let left = schema(&[("id", ColumnType::Utf8)]);
        let right = schema(&[("id", ColumnType::Int64)]);
        match unify(&[left, right]).unwrap_err() {
            UnifyError::ConflictingColumn { name, left, right } => {
                assert_eq!(name, "id");
                assert_eq!(left, ColumnType::Utf8);
                assert_eq!(right, ColumnType::Int64);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unify_of_nothing_is_empty() {
        assert!(unify(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_subset_requires_equal_types() {
        let actual = schema(&[("a", ColumnType::Utf8), ("b", ColumnType::Int64)]);
        assert!(is_subset_of(&schema(&[("a", ColumnType::Utf8)]), &actual));
        assert!(!is_subset_of(&schema(&[("a", ColumnType::Int64)]), &actual));
        assert!(!is_subset_of(&schema(&[("z", ColumnType::Utf8)]), &actual));
    }

    #[test]
    fn test_verify_mandatory_lists_every_offender() {
        let required = schema(&[
            ("a", ColumnType::Utf8),
            ("b", ColumnType::Int64),
            ("c", ColumnType::Boolean),
        ]);
        let actual = schema(&[("a", ColumnType::Utf8), ("b", ColumnType::Utf8)]);
        match verify_mandatory(&required, &actual).unwrap_err() {
            UnifyError::MissingMandatoryColumns { columns } => {
                assert_eq!(columns, vec!["b".to_string(), "c".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_verify_mandatory_passes_on_superset() {
        let required = schema(&[("a", ColumnType::Utf8)]);
        let actual = schema(&[("a", ColumnType::Utf8), ("extra", ColumnType::Null)]);
        assert!(verify_mandatory(&required, &actual).is_ok());
    }
}
