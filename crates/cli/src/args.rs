//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Translate source flags into store construction options.
//!
//! Non-responsibilities:
//! - Does not query the store (see `commands` module).

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use flatconf::{ConfigOption, StoreBuilder};

#[derive(Parser)]
#[command(name = "flatconf")]
#[command(about = "Inspect flattened configuration from a JSON file or the environment", long_about = None)]
#[command(version)]
#[command(group(ArgGroup::new("source").required(true).args(["file", "env"])))]
#[command(
    after_help = "Examples:\n  flatconf --file config.json keys\n  flatconf --file config.json get database.port --as int\n  flatconf --env get port --as int --default 8080\n"
)]
pub struct Cli {
    /// Load keys from this JSON config file (created if missing)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Resolve keys from environment variables only
    #[arg(short, long)]
    pub env: bool,

    /// Delimiter separating key segments
    #[arg(short, long, value_name = "D")]
    pub delimiter: Option<String>,

    /// Environment prefix recorded on the store (lookups use the bare key)
    #[arg(long, value_name = "P")]
    pub env_prefix: Option<String>,

    /// Load a `.env` file from the working directory first
    #[arg(long)]
    pub dotenv: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every flattened key, one per line
    Keys {
        /// Print a JSON report instead of plain lines
        #[arg(long)]
        json: bool,
    },

    /// Print the value stored under a key
    Get {
        /// Key to look up (case-insensitive)
        key: String,

        /// Type to coerce the value into
        #[arg(long = "as", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value returned when the key is missing; parsed as JSON when valid
        #[arg(long, value_name = "V")]
        default: Option<String>,
    },
}

/// Target type of `get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    String,
    Int,
    Int64,
    Float,
    Bool,
    Slice,
    /// The raw value as compact JSON
    Json,
}

impl Cli {
    /// Store construction options, in application order.
    pub fn store_builder(&self) -> StoreBuilder {
        let mut builder = StoreBuilder::new();
        if let Some(delimiter) = &self.delimiter {
            builder = builder.option(ConfigOption::KeyDelimiter(delimiter.clone()));
        }
        if let Some(prefix) = &self.env_prefix {
            builder = builder.option(ConfigOption::EnvPrefix(prefix.clone()));
        }
        if let Some(path) = &self.file {
            builder = builder.with_config_file(path.clone()).use_config_file();
        }
        if self.env {
            builder = builder.use_environment();
        }
        builder
    }
}
