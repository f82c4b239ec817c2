//! Top-level document conversion.
//!
//! Pipeline: resolve references to a fixed point, extract message
//! definitions, build one columnar schema per message payload. Merging the
//! per-message schemas into a single table schema is the unifier's job.

use serde_yaml::Value;
use tracing::debug;

use s2p_model::ColumnSchema;

use crate::builder::build_schema;
use crate::error::{ConvertError, Result};
use crate::extract::extract_messages;
use crate::resolve::resolve_refs;

/// Convert a channel-based document into one schema per message definition.
///
/// Returned in document order. A message without a `payload` key aborts the
/// conversion; a document without messages yields an empty list and the
/// caller decides whether that is an error.
pub fn schemas_from_document(doc: &Value) -> Result<Vec<ColumnSchema>> {
    let resolved = resolve_refs(doc)?;
    let messages = extract_messages(&resolved);
    let mut schemas = Vec::with_capacity(messages.len());
    for message in messages {
        let payload = message
            .get("payload")
            .ok_or_else(|| ConvertError::MissingPayload {
                fragment: message.clone(),
            })?;
        schemas.push(build_schema(payload)?);
    }
    debug!(schemas = schemas.len(), "document converted");
    Ok(schemas)
}
