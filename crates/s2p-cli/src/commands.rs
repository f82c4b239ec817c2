//! Per-document conversion pipeline.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use s2p_core::schemas_from_document;
use s2p_ingest::load_document;
use s2p_model::ColumnSchema;
use s2p_unify::{unify, verify_mandatory};

use crate::types::{BatchResult, FileError, FileOutcome, FileReport};

/// Convert every document in the batch.
///
/// When `metadata_path` is given, its document is converted first and every
/// file's unified schema must contain its columns. Per-file failures land in
/// the batch result; only a broken metadata document aborts the whole run.
pub fn run_convert(paths: &[impl AsRef<Path>], metadata_path: Option<&Path>) -> Result<BatchResult> {
    let mandatory = match metadata_path {
        Some(path) => Some(
            build_mandatory_schema(path)
                .with_context(|| format!("load metadata document {}", path.display()))?,
        ),
        None => None,
    };
    let files = paths
        .iter()
        .map(|path| convert_file(path.as_ref(), mandatory.as_ref()))
        .collect();
    Ok(BatchResult { files })
}

/// Convert the metadata document into the set of mandatory columns.
fn build_mandatory_schema(path: &Path) -> Result<ColumnSchema> {
    let doc = load_document(path)?;
    let schemas = schemas_from_document(&doc)?;
    anyhow::ensure!(
        !schemas.is_empty(),
        "metadata document declares no messages"
    );
    Ok(unify(&schemas)?)
}

fn convert_file(path: &Path, mandatory: Option<&ColumnSchema>) -> FileReport {
    let span = info_span!("convert", path = %path.display());
    let _guard = span.enter();
    let failed = |messages, error| FileReport {
        path: path.to_path_buf(),
        messages,
        outcome: FileOutcome::Failed { error },
    };

    let doc = match load_document(path) {
        Ok(doc) => doc,
        Err(error) => return failed(0, FileError::Load(error)),
    };
    let schemas = match schemas_from_document(&doc) {
        Ok(schemas) => schemas,
        Err(error) => return failed(0, FileError::Convert(error)),
    };
    if schemas.is_empty() {
        return failed(0, FileError::NoMessages);
    }
    let messages = schemas.len();
    let schema = match unify(&schemas) {
        Ok(schema) => schema,
        Err(error) => return failed(messages, FileError::Unify(error)),
    };
    if let Some(required) = mandatory {
        if let Err(error) = verify_mandatory(required, &schema) {
            return failed(messages, FileError::Unify(error));
        }
    }
    info!(messages, columns = schema.len(), "document converted");
    FileReport {
        path: path.to_path_buf(),
        messages,
        outcome: FileOutcome::Converted { schema },
    }
}
