//! Environment variable access for the configuration store.
//!
//! Responsibilities:
//! - Read a single environment variable, treating empty values as unset.
//! - Derive the variable name a key falls back to.
//! - Load a `.env` file into the process environment on request.
//!
//! Does NOT handle:
//! - Searching the loaded tree (see `config_store.rs`).
//!
//! Invariants:
//! - The variable name is the upper-cased key with delimiters kept
//!   literally: `db.port` is looked up as `DB.PORT`.
//! - `DOTENV_DISABLED` is checked before any `.env` file is touched.

use std::io::ErrorKind;

use crate::constants::DOTENV_DISABLED_VAR;

use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or not
/// valid unicode. Non-empty values are returned untouched.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Name of the variable consulted when `key` is missing from the tree.
pub(crate) fn variable_name(key: &str) -> String {
    key.to_uppercase()
}

fn dotenv_gate_closed() -> bool {
    env_var_or_none(DOTENV_DISABLED_VAR).is_some_and(|flag| flag == "1" || flag == "true")
}

/// Populate the process environment from `.env` in the working directory
/// (or a parent), leaving variables that are already set alone.
///
/// Does nothing when `DOTENV_DISABLED` is `1` or `true`, and a missing file
/// is not an error.
///
/// # Errors
///
/// Returns `ConfigError::DotenvParse` for a malformed line,
/// `ConfigError::DotenvIo` when the file cannot be read, and
/// `ConfigError::DotenvUnknown` for anything else `dotenvy` reports.
pub fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_gate_closed() {
        tracing::debug!("Skipping .env loading, {} is set", DOTENV_DISABLED_VAR);
        return Ok(());
    }

    let error = match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            return Ok(());
        }
        Err(error) => error,
    };

    match error {
        dotenvy::Error::Io(io) if io.kind() == ErrorKind::NotFound => Ok(()),
        dotenvy::Error::Io(io) => Err(ConfigError::DotenvIo { kind: io.kind() }),
        dotenvy::Error::LineParse(_, error_index) => Err(ConfigError::DotenvParse { error_index }),
        _ => Err(ConfigError::DotenvUnknown),
    }
}
