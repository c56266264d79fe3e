//! Process-wide shared store.
//!
//! The shared instance is created lazily with default settings the first
//! time it is touched. Every free function locks it for the duration of
//! one call; callers that need several operations to be atomic (for
//! example configuring and then loading) should hold the guard returned
//! by [`instance`].

use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use serde_json::Value;

use crate::store::{ConfigError, ConfigOption, ConfigStore};

static INSTANCE: OnceLock<Mutex<ConfigStore>> = OnceLock::new();

/// Lock and return the shared store, creating it on first use.
pub fn instance() -> MutexGuard<'static, ConfigStore> {
    INSTANCE
        .get_or_init(|| Mutex::new(ConfigStore::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Apply `options` to the shared store in order.
pub fn configure<I>(options: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = ConfigOption>,
{
    let mut store = instance();
    for option in options {
        option.apply(&mut store)?;
    }
    Ok(())
}

pub fn get(key: &str, default: impl Into<Value>) -> Value {
    instance().get(key, default)
}

pub fn get_string(key: &str, default: impl Into<Value>) -> String {
    instance().get_string(key, default)
}

pub fn get_int(key: &str, default: impl Into<Value>) -> isize {
    instance().get_int(key, default)
}

pub fn get_int64(key: &str, default: impl Into<Value>) -> i64 {
    instance().get_int64(key, default)
}

pub fn get_float(key: &str, default: impl Into<Value>) -> f64 {
    instance().get_float(key, default)
}

pub fn get_bool(key: &str, default: impl Into<Value>) -> bool {
    instance().get_bool(key, default)
}

pub fn get_slice(key: &str, default: impl Into<Value>) -> Vec<String> {
    instance().get_slice(key, default)
}

/// Snapshot of the shared store's flattened keys.
pub fn all_keys() -> Vec<String> {
    instance().all_keys().to_vec()
}

pub fn set_file_permissions(mode: u32) {
    instance().set_file_permissions(mode);
}
