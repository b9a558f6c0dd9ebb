//! Elastic-Backend CLI
//!
//! Prints compiled mapping documents and search request bodies as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use elastic_backend::{
    cli::{execute_command, BackendArgs},
    config,
};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let args = BackendArgs::parse();

    // Initialize logging; RUST_LOG wins over -v/--quiet
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting elastic-backend v{}", elastic_backend::VERSION);

    let settings = config::load(args.config.as_deref()).context("failed to load settings")?;

    let output = execute_command(&args, &settings).context("command failed")?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", rendered);

    Ok(())
}
