//! Tests for the configuration store.
//!
//! Responsibilities:
//! - Test file loading, bootstrap of missing files and lazy loading.
//! - Test environment fallback and default handling.
//! - Test declarative construction through options and the builder.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub mod builder_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Document used by the file-mode scenarios.
pub const SAMPLE_CONFIG: &str =
    r#"{"auth":{"ismart":true,"maps":["a","b","c"]},"db":{"test":{"port":1443}}}"#;

/// Write `contents` to `name` inside `dir` and return its path.
pub fn write_config(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
