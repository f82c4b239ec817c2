//! Schema document loading for the schema2polars pipeline.
//!
//! Documents are parsed into `serde_yaml::Value` trees. YAML documents are
//! annotated with a reserved `__line__` key on every mapping so conversion
//! errors can point at the offending source line; JSON documents carry no
//! line information.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

pub mod airbyte;
pub mod error;
pub mod json;
pub mod yaml;

pub use airbyte::prepare_airbyte_schema;
pub use error::{LoadError, Result};
pub use json::load_json;
pub use yaml::{load_yaml, load_yaml_with_lines};

/// Load a schema document from disk, dispatching on the file extension.
///
/// `.json` files are parsed as JSON; everything else is parsed as YAML with
/// line annotation. A UTF-8 BOM is tolerated.
pub fn load_document(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    debug!(path = %path.display(), is_json, "loading schema document");
    if is_json {
        load_json(text)
    } else {
        load_yaml_with_lines(text)
    }
}
