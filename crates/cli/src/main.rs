//! flatconf CLI - inspect flattened configuration from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments.
//! - Build a configuration store from the selected source.
//! - Print keys or typed values to stdout.
//!
//! Does NOT handle:
//! - Loading, flattening or coercion (see the `flatconf` library).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only command output.
//! - Any store construction failure exits with code 1.

mod args;
mod commands;

use anyhow::{Context, Result};
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.dotenv {
        flatconf::load_dotenv().context("Failed to load .env file")?;
    }

    let store = cli.store_builder().build().with_context(|| match &cli.file {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to configure environment store".to_string(),
    })?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Keys { json } => commands::run_keys(&store, *json, &mut out),
        Commands::Get { key, kind, default } => {
            commands::run_get(&store, key, *kind, default.as_deref(), &mut out)
        }
    }
}
