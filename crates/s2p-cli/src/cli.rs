//! CLI argument definitions for schema2polars.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "schema2polars",
    version,
    about = "Convert AsyncAPI / JSON Schema documents to Polars schemas",
    long_about = "Convert declarative message-schema documents (AsyncAPI or JSON Schema,\n\
                  YAML or JSON) into strongly-typed columnar schemas.\n\n\
                  Internal $ref pointers are resolved, every message reachable from the\n\
                  document's channels is converted, and the per-message schemas are\n\
                  unified into one table schema. Returns an error if at least one\n\
                  document is problematic."
)]
pub struct Cli {
    /// Schema documents to convert (YAML or JSON).
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Only report failing documents; print nothing for documents that pass.
    #[arg(long = "check")]
    pub check: bool,

    /// Document whose columns every converted schema must contain.
    #[arg(long = "metadata", value_name = "PATH")]
    pub metadata: Option<PathBuf>,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
