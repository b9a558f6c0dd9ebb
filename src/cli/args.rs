//! Command line argument parsing using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Elastic-backend - schema mappings and search bodies for Elasticsearch
#[derive(Parser, Debug, Clone)]
#[command(name = "elastic-backend")]
#[command(about = "Compile schema mappings and build search request bodies for Elasticsearch")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct BackendArgs {
    /// Path to settings.yml
    #[arg(short, long, global = true, env = "ELASTIC_BACKEND_SETTINGS_PATH")]
    pub config: Option<PathBuf>,

    /// Verbose logging (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl BackendArgs {
    /// Log filter directive for the requested verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile a schema definition into a mapping document
    Schema(SchemaArgs),

    /// Build a search request body
    Query(QueryArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct SchemaArgs {
    /// Schema definition file (YAML)
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema_file: PathBuf,
}

#[derive(Parser, Debug, Clone)]
pub struct QueryArgs {
    /// Query string
    #[arg(long = "q", default_value = "*:*")]
    pub query: String,

    /// Schema definition file, used to find the content field
    #[arg(long, value_name = "SCHEMA_FILE")]
    pub schema: Option<PathBuf>,

    /// Index of the first result
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// Index one past the last result; unbounded when omitted
    #[arg(long)]
    pub end: Option<usize>,

    /// Sort fields; prefix with '-' for descending (comma-separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub sort: Vec<String>,

    /// Facet fields (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub facet: Vec<String>,

    /// Stored fields to return (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Highlight matches in the content field
    #[arg(long)]
    pub highlight: bool,

    /// Nested terms to match (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub nested_terms: Vec<String>,

    /// Nested block path (defaults to the configured path)
    #[arg(long)]
    pub nested_path: Option<String>,

    /// Term field inside the nested block (defaults to the configured field)
    #[arg(long)]
    pub nested_field: Option<String>,

    /// File holding a custom query (JSON)
    #[arg(long, value_name = "QUERY_FILE")]
    pub custom_query: Option<PathBuf>,
}
