//! The configuration store and its typed accessors.
//!
//! Responsibilities:
//! - Hold store settings (delimiter, file, permissions, prefix, source mode).
//! - Load the config file once, merge it over programmatic defaults and
//!   derive the case-insensitive tree and the flat key index.
//! - Answer `get*` queries with environment and default fallback.
//!
//! Does NOT handle:
//! - Coercion rules (see `value`).
//! - File I/O details (see `file.rs`).
//!
//! Invariants / Assumptions:
//! - Typed accessors never fail; a lazy load failure is logged and the
//!   store answers from an empty tree.
//! - Once set explicitly, the source mode never changes.
//! - `is_loaded()` never reverts to false.
//! - Single writer: the store has no internal locking beyond the
//!   write-once cells (see `global` for a shared instance).

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde_json::{Map, Value};

use super::env::{self, env_var_or_none};
use super::error::ConfigError;
use super::file::{discover, write_config_file};
use super::options::{ConfigOption, StoreBuilder};
use crate::constants::{
    DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_NAME, DEFAULT_FILE_PERMISSIONS, DEFAULT_KEY_DELIMITER,
    PERMISSION_BITS_MASK,
};
use crate::namespace::{FlatIndex, copy_and_lowercase, search};
use crate::value;

/// Where a store resolves keys from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// Keys come from the JSON config file, then the environment.
    File,
    /// Keys come from the environment (and programmatic defaults).
    Environment,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::File => write!(f, "file"),
            SourceMode::Environment => write!(f, "environment"),
        }
    }
}

/// Derived state built from the merged tree.
#[derive(Debug, Clone)]
struct StoreView {
    tree: Map<String, Value>,
    config: Value,
    index: FlatIndex,
}

impl StoreView {
    fn build(tree: Map<String, Value>, delimiter: &str) -> Self {
        let config = Value::Object(copy_and_lowercase(&tree));
        let index = FlatIndex::from_tree(&tree, delimiter);
        Self {
            tree,
            config,
            index,
        }
    }
}

/// In-process key/value configuration store.
#[derive(Debug)]
pub struct ConfigStore {
    key_delimiter: String,
    config_name: String,
    config_file: PathBuf,
    file_permissions: u32,
    env_prefix: Option<String>,
    source: Option<SourceMode>,
    /// Programmatic defaults seeded through `unmarshal`.
    defaults: Map<String, Value>,
    /// Contents of the config file, set once the file has been read.
    file_tree: OnceLock<Map<String, Value>>,
    view: OnceLock<StoreView>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create a store with default settings. Nothing is read until the
    /// first query or an explicit [`use_config_file`](Self::use_config_file).
    pub fn new() -> Self {
        Self {
            key_delimiter: DEFAULT_KEY_DELIMITER.to_string(),
            config_name: DEFAULT_CONFIG_NAME.to_string(),
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            file_permissions: DEFAULT_FILE_PERMISSIONS,
            env_prefix: None,
            source: None,
            defaults: Map::new(),
            file_tree: OnceLock::new(),
            view: OnceLock::new(),
        }
    }

    /// Create a store and apply `options` in order.
    pub fn with_options<I>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = ConfigOption>,
    {
        let mut store = Self::new();
        for option in options {
            option.apply(&mut store)?;
        }
        Ok(store)
    }

    /// Start a [`StoreBuilder`].
    pub fn builder() -> StoreBuilder {
        StoreBuilder::new()
    }

    // ---------------------------------------------------------------------
    // Settings
    // ---------------------------------------------------------------------

    /// Set the delimiter separating key segments. Empty input is ignored.
    pub fn set_key_delimiter(&mut self, delimiter: impl Into<String>) {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            tracing::warn!("Ignoring empty key delimiter");
            return;
        }
        self.key_delimiter = delimiter;
        self.view.take();
    }

    /// Point the store at a config file.
    ///
    /// The config name becomes the file name up to its first `.`. A file
    /// that does not exist yet is created immediately. Empty paths are
    /// ignored.
    pub fn set_config_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(());
        }

        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            self.config_name = name.split('.').next().unwrap_or_default().to_string();
        }
        self.config_file = path.to_path_buf();

        if !path.exists() {
            write_config_file(path, self.file_permissions, &self.current_config())?;
        }
        Ok(())
    }

    pub fn set_config_name(&mut self, name: impl Into<String>) {
        self.config_name = name.into();
    }

    /// Record an environment prefix. Empty input is ignored.
    ///
    /// The prefix is kept for callers to read back; lookups always use the
    /// bare upper-cased key.
    pub fn set_env_prefix(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.env_prefix = Some(prefix);
        }
    }

    /// Set the mode used when creating config files; only permission bits are kept.
    pub fn set_file_permissions(&mut self, mode: u32) {
        self.file_permissions = mode & PERMISSION_BITS_MASK;
    }

    /// Switch to file mode and load the config file now.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is already in environment mode or the
    /// missing config file cannot be created.
    pub fn use_config_file(&mut self) -> Result<(), ConfigError> {
        self.lock_source(SourceMode::File)?;
        if self.file_tree.get().is_none() {
            let tree = discover(
                &self.config_file,
                self.file_permissions,
                &self.current_config(),
            )?;
            let _ = self.file_tree.set(tree);
        }
        self.view.take();
        Ok(())
    }

    /// Switch to environment mode. Variables are read per key on demand.
    pub fn use_environment(&mut self) -> Result<(), ConfigError> {
        self.lock_source(SourceMode::Environment)?;
        self.view.take();
        Ok(())
    }

    /// Parse `data` as a JSON object and merge its top-level keys into the
    /// defaults. A config file loaded later overrides those keys.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if `data` is not a JSON object.
    pub fn unmarshal(&mut self, data: &[u8]) -> Result<(), ConfigError> {
        let parsed: Map<String, Value> =
            serde_json::from_slice(data).map_err(|source| ConfigError::Parse { source })?;
        self.defaults.extend(parsed);
        self.view.take();
        Ok(())
    }

    fn lock_source(&mut self, requested: SourceMode) -> Result<(), ConfigError> {
        match self.source {
            Some(current) if current != requested => {
                Err(ConfigError::SourceModeLocked { current, requested })
            }
            _ => {
                self.source = Some(requested);
                Ok(())
            }
        }
    }

    // ---------------------------------------------------------------------
    // Introspection
    // ---------------------------------------------------------------------

    pub fn key_delimiter(&self) -> &str {
        &self.key_delimiter
    }

    pub fn config_name(&self) -> &str {
        &self.config_name
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    pub fn file_permissions(&self) -> u32 {
        self.file_permissions
    }

    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Effective source mode; file mode until another mode is chosen.
    pub fn source_mode(&self) -> SourceMode {
        self.source.unwrap_or(SourceMode::File)
    }

    /// True once the config file has been read.
    pub fn is_loaded(&self) -> bool {
        self.file_tree.get().is_some()
    }

    /// The merged tree with its original key casing.
    pub fn defaults(&self) -> &Map<String, Value> {
        &self.view().tree
    }

    /// Flat index built by the most recent load.
    pub fn flat_index(&self) -> &FlatIndex {
        &self.view().index
    }

    /// Every flattened key from the most recent load. Keys only available
    /// through the environment are not listed.
    pub fn all_keys(&self) -> &[String] {
        self.view().index.all_keys()
    }

    // ---------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------

    /// Look up `key` case-insensitively.
    ///
    /// A miss goes through [`get_environment_value`](Self::get_environment_value)
    /// with the upper-cased key (delimiters kept), so the result of that path
    /// is always a string: the variable's raw value or the stringified
    /// `default`. A list or map default therefore comes back as `""`.
    pub fn get(&self, key: &str, default: impl Into<Value>) -> Value {
        let lowered = key.to_lowercase();
        let path: Vec<&str> = lowered.split(self.key_delimiter.as_str()).collect();

        if let Some(found) = search(&self.view().config, &path).filter(|v| !v.is_null()) {
            return found.clone();
        }

        Value::String(self.get_environment_value(&env::variable_name(key), default))
    }

    pub fn get_string(&self, key: &str, default: impl Into<Value>) -> String {
        value::to_string(&self.get(key, default))
    }

    /// Platform-width integer; see [`value::to_int`].
    pub fn get_int(&self, key: &str, default: impl Into<Value>) -> isize {
        value::to_int(&self.get(key, default))
    }

    pub fn get_int64(&self, key: &str, default: impl Into<Value>) -> i64 {
        value::to_int64(&self.get(key, default))
    }

    pub fn get_float(&self, key: &str, default: impl Into<Value>) -> f64 {
        value::to_float(&self.get(key, default))
    }

    pub fn get_bool(&self, key: &str, default: impl Into<Value>) -> bool {
        value::to_bool(&self.get(key, default))
    }

    pub fn get_slice(&self, key: &str, default: impl Into<Value>) -> Vec<String> {
        value::to_string_slice(&self.get(key, default))
    }

    /// Map stored under `key`, or parsed from a JSON string; empty otherwise.
    pub fn get_string_map(&self, key: &str) -> Map<String, Value> {
        value::to_string_map(&self.get(key, Value::Null))
    }

    /// Raw value of the environment variable `name`, or `default` as a string.
    pub fn get_environment_value(&self, name: &str, default: impl Into<Value>) -> String {
        env_var_or_none(name).unwrap_or_else(|| value::to_string(&default.into()))
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// The in-memory configuration written into a synthesized config file.
    fn current_config(&self) -> Map<String, Value> {
        match self.view.get() {
            Some(view) => match &view.config {
                Value::Object(config) => config.clone(),
                _ => Map::new(),
            },
            None => copy_and_lowercase(&self.defaults),
        }
    }

    fn view(&self) -> &StoreView {
        self.view.get_or_init(|| {
            let mut tree = self.defaults.clone();
            if self.source_mode() == SourceMode::File
                && let Some(file_tree) = self.load_file_lazily()
            {
                tree.extend(file_tree.clone());
            }
            StoreView::build(tree, &self.key_delimiter)
        })
    }

    fn load_file_lazily(&self) -> Option<&Map<String, Value>> {
        if let Some(tree) = self.file_tree.get() {
            return Some(tree);
        }

        let current = copy_and_lowercase(&self.defaults);
        match discover(&self.config_file, self.file_permissions, &current) {
            Ok(tree) => Some(self.file_tree.get_or_init(|| tree)),
            Err(e) => {
                tracing::warn!(
                    path = %self.config_file.display(),
                    error = %e,
                    "Failed to load config file, answering from defaults"
                );
                None
            }
        }
    }
}
