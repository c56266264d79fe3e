//! Configuration store backed by a JSON file or the process environment.
//!
//! Responsibilities:
//! - Load key/value settings from a JSON file or environment variables.
//! - Expose typed accessors with environment and default fallback.
//! - Provide declarative construction through `ConfigOption`/`StoreBuilder`.
//!
//! Does NOT handle:
//! - Coercion rules (see `value`).
//! - Key flattening and search (see `namespace`).
//!
//! Invariants / Assumptions:
//! - Lookups search the file tree first, then the environment, then the
//!   caller's default.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

mod config_store;
mod env;
mod error;
mod file;
mod options;

pub use config_store::{ConfigStore, SourceMode};
pub use env::{env_var_or_none, load_dotenv};
pub use error::ConfigError;
pub use options::{ConfigOption, StoreBuilder};

#[cfg(test)]
mod tests;
