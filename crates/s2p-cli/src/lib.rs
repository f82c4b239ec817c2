//! Library surface of the schema2polars CLI.
//!
//! The binary stays thin; conversion, reporting, and logging live here so
//! integration tests can drive them directly.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod report;
pub mod types;
