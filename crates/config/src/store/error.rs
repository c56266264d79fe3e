//! Error types for the configuration store.
//!
//! Responsibilities:
//! - Define error variants for the store's explicit entry points
//!   (`unmarshal`, `use_config_file`, `set_config_file`, option building).
//!
//! Does NOT handle:
//! - Failures inside typed accessors, which degrade to fallback values.
//! - Map coercion failures (see `value::CastError`).
//!
//! Invariants:
//! - File errors carry the path they refer to.
//! - `.env` errors carry an offset or an I/O kind, never file contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use super::SourceMode;

/// Errors that can occur while configuring or loading a store.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration JSON: {source}")]
    Parse { source: serde_json::Error },

    #[error("Failed to read config file at {path}: {source}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Source mode is already set to {current}; cannot switch to {requested}")]
    SourceModeLocked {
        current: SourceMode,
        requested: SourceMode,
    },

    /// A `.env` line could not be parsed. Carries the byte offset only,
    /// never the line itself.
    #[error(".env file is malformed at byte {error_index} (set DOTENV_DISABLED=1 to skip it)")]
    DotenvParse { error_index: usize },

    #[error(".env file could not be read: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error(".env file could not be loaded (set DOTENV_DISABLED=1 to skip it)")]
    DotenvUnknown,
}
