//! Config file discovery, parsing and creation.
//!
//! Responsibilities:
//! - Read the config file and parse it as a JSON object.
//! - Synthesize a missing config file from the in-memory configuration
//!   and read it back once.
//! - Create config files with the configured permission bits.
//!
//! Does NOT handle:
//! - Flattening or merging the parsed tree (see `namespace` and `config_store.rs`).
//!
//! Invariants:
//! - A file that exists but is not a JSON object yields an empty tree; the
//!   parse error is logged, never returned.
//! - Discovery synthesizes the file at most once per call.
//! - File handles never outlive the function that opened them.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde_json::{Map, Value};

use super::error::ConfigError;

/// Read the config file at `path`, creating it from `current` when it
/// cannot be opened.
pub(crate) fn discover(
    path: &Path,
    permissions: u32,
    current: &Map<String, Value>,
) -> Result<Map<String, Value>, ConfigError> {
    let mut synthesized = false;
    loop {
        match fs::read(path) {
            Ok(bytes) => return Ok(parse_or_empty(path, &bytes)),
            Err(error) if !synthesized => {
                tracing::debug!(
                    path = %path.display(),
                    error = %error,
                    "Config file unavailable, creating it"
                );
                write_config_file(path, permissions, current)?;
                synthesized = true;
            }
            Err(source) => {
                return Err(ConfigError::ConfigFileRead {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

fn parse_or_empty(path: &Path, bytes: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(bytes) {
        Ok(tree) => {
            tracing::debug!(path = %path.display(), "Config file loaded");
            tree
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Config file is not a valid JSON object, ignoring its contents"
            );
            Map::new()
        }
    }
}

/// Write `config` as compact JSON to `path`.
///
/// An existing file is appended to; otherwise the file (and any missing
/// parent directory) is created with `permissions`.
pub(crate) fn write_config_file(
    path: &Path,
    permissions: u32,
    config: &Map<String, Value>,
) -> Result<(), ConfigError> {
    let write_error = |source| ConfigError::ConfigFileWrite {
        path: path.to_path_buf(),
        source,
    };

    let content = serde_json::to_vec(config).map_err(ConfigError::Serialize)?;

    let mut file = match OpenOptions::new().append(true).open(path) {
        Ok(file) => file,
        Err(_) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(write_error)?;
            }
            create_file(path, permissions).map_err(write_error)?
        }
    };
    file.write_all(&content).map_err(write_error)?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Config file written");
    Ok(())
}

fn create_file(path: &Path, permissions: u32) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(permissions);
    }

    let file = options.open(path)?;

    // The mode above is filtered by the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(permissions))?;
    }
    #[cfg(not(unix))]
    let _ = permissions;

    Ok(file)
}
