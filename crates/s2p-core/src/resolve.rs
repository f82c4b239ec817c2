//! Internal reference resolution.
//!
//! A reference is a mapping holding the reserved `$ref` key whose value is a
//! `#/seg1/seg2/...` pointer into the same document. Resolution rewrites the
//! whole tree until it stops changing: one rewrite can surface new references
//! when the replacement fragment itself contains `$ref` nodes. Pointers
//! always resolve against the original input document, never against a
//! partially rewritten tree.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::error::{ConvertError, Result};

/// Upper bound on rewrite passes. Documents nest far shallower than this;
/// hitting the bound means the references form a growing cycle.
pub const MAX_RESOLVE_PASSES: usize = 64;

/// Look up the node a `#/a/b/c`-style pointer names.
///
/// Leading `#` and `/` characters are stripped and empty segments skipped, so
/// a bare `#/` or a trailing slash is tolerated. Any segment that does not
/// resolve fails with [`ConvertError::BrokenPointer`] carrying the full
/// pointer; a missing segment is never a null result.
pub fn resolve_pointer<'a>(root: &'a Value, pointer: &str) -> Result<&'a Value> {
    let mut node = root;
    for segment in pointer.trim_start_matches(['#', '/']).split('/') {
        if segment.is_empty() {
            continue;
        }
        node = node
            .get(segment)
            .ok_or_else(|| ConvertError::BrokenPointer {
                pointer: pointer.to_string(),
            })?;
    }
    Ok(node)
}

/// Replace every internal reference with the fragment it points to, repeated
/// until the tree reaches a fixed point.
///
/// The input is never mutated; a fully dereferenced copy is returned. A
/// reference that resolves to itself is already stable and survives into the
/// output; mutually recursive references grow the tree on every pass and fail
/// with [`ConvertError::ReferenceCycle`] once [`MAX_RESOLVE_PASSES`] is hit.
pub fn resolve_refs(doc: &Value) -> Result<Value> {
    let mut current = doc.clone();
    for pass in 1..=MAX_RESOLVE_PASSES {
        let next = resolve_refs_once(&current, doc)?;
        if next == current {
            debug!(passes = pass, "references stabilized");
            return Ok(next);
        }
        current = next;
    }
    Err(ConvertError::ReferenceCycle {
        passes: MAX_RESOLVE_PASSES,
    })
}

fn resolve_refs_once(node: &Value, root: &Value) -> Result<Value> {
    if let Some(reference) = node.get("$ref") {
        let Some(pointer) = reference.as_str() else {
            return Err(ConvertError::BrokenPointer {
                pointer: format!("{reference:?}"),
            });
        };
        return resolve_pointer(root, pointer).cloned();
    }
    match node {
        Value::Mapping(map) => {
            let mut resolved = Mapping::new();
            for (key, value) in map {
                resolved.insert(key.clone(), resolve_refs_once(value, root)?);
            }
            Ok(Value::Mapping(resolved))
        }
        Value::Sequence(items) => {
            let resolved: Vec<Value> = items
                .iter()
                .map(|item| resolve_refs_once(item, root))
                .collect::<Result<_>>()?;
            Ok(Value::Sequence(resolved))
        }
        scalar => Ok(scalar.clone()),
    }
}
