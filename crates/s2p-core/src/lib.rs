//! Schema resolution and type-mapping engine.
//!
//! Converts declarative message-schema documents (JSON Schema dialects and
//! AsyncAPI specifications) into columnar table schemas. The pipeline:
//!
//! 1. [`resolve::resolve_refs`] rewrites internal `$ref` nodes to a fixed
//!    point against the original document.
//! 2. [`extract::extract_messages`] collects message definitions from the
//!    document's channels.
//! 3. [`builder::build_schema`] recursively converts each message payload
//!    into an ordered list of typed columns.
//!
//! All operations are pure over immutable input trees and deterministic;
//! errors carry structured line/fragment context and abort the conversion of
//! the document at the first failure.

pub mod builder;
pub mod convert;
pub mod error;
pub mod extract;
pub mod mapper;
pub mod resolve;

pub use builder::{build_fields, build_schema};
pub use convert::schemas_from_document;
pub use error::{ConvertError, Result};
pub use extract::extract_messages;
pub use mapper::{FieldSpec, extract_field_spec, map_field_type};
pub use resolve::{MAX_RESOLVE_PASSES, resolve_pointer, resolve_refs};
