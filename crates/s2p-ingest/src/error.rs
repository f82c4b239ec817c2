//! Error types for document loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading a schema document into a value tree.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// YAML text failed to scan or parse.
    #[error("YAML syntax error: {0}")]
    Scan(#[from] yaml_rust2::scanner::ScanError),

    /// Plain YAML deserialization failed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON text failed to parse.
    #[error("JSON syntax error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document uses YAML anchors/aliases, which the line-annotating
    /// loader does not support.
    #[error("YAML aliases are not supported")]
    UnsupportedAlias,

    /// The document contains no content.
    #[error("document is empty")]
    EmptyDocument,

    /// A schema handed to Airbyte preparation lacks a required key.
    #[error("Airbyte schema is missing '{0}'")]
    MissingAirbyteKey(&'static str),
}

/// Result type alias for loading operations.
pub type Result<T> = std::result::Result<T, LoadError>;
