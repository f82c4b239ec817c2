//! Result types shared between conversion and reporting.

use std::path::PathBuf;

use s2p_core::ConvertError;
use s2p_ingest::LoadError;
use s2p_model::ColumnSchema;
use s2p_unify::UnifyError;

/// Outcome of converting one batch of documents.
#[derive(Debug)]
pub struct BatchResult {
    pub files: Vec<FileReport>,
}

impl BatchResult {
    pub fn has_failures(&self) -> bool {
        self.files
            .iter()
            .any(|file| !matches!(file.outcome, FileOutcome::Converted { .. }))
    }
}

/// Outcome of converting one document.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Number of message definitions found in the document.
    pub messages: usize,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub enum FileOutcome {
    /// The document converted (and passed the metadata check, if requested).
    Converted { schema: ColumnSchema },
    /// The document failed somewhere in the pipeline.
    Failed { error: FileError },
}

/// Where in the pipeline a document failed.
#[derive(Debug)]
pub enum FileError {
    Load(LoadError),
    Convert(ConvertError),
    Unify(UnifyError),
    /// The document declares no messages, so there is nothing to convert.
    NoMessages,
}
