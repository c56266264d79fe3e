//! Declarative construction of a [`ConfigStore`].
//!
//! Responsibilities:
//! - Define the closed set of construction instructions ([`ConfigOption`]).
//! - Provide a builder-pattern [`StoreBuilder`] recording instructions in order.
//!
//! Does NOT handle:
//! - The behavior behind each instruction (see `config_store.rs`).
//!
//! Invariants / Assumptions:
//! - Instructions are applied strictly in the order given.
//! - `FilePermissions` only affects files created after it is applied, so it
//!   belongs before `ConfigFile` and `UseConfigFile`.

use std::path::PathBuf;

use super::config_store::ConfigStore;
use super::error::ConfigError;

/// One construction instruction for a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOption {
    KeyDelimiter(String),
    ConfigFile(PathBuf),
    ConfigName(String),
    EnvPrefix(String),
    FilePermissions(u32),
    UseConfigFile,
    UseEnvironment,
}

impl ConfigOption {
    /// Apply this instruction to `store`.
    pub fn apply(self, store: &mut ConfigStore) -> Result<(), ConfigError> {
        match self {
            ConfigOption::KeyDelimiter(delimiter) => store.set_key_delimiter(delimiter),
            ConfigOption::ConfigFile(path) => store.set_config_file(path)?,
            ConfigOption::ConfigName(name) => store.set_config_name(name),
            ConfigOption::EnvPrefix(prefix) => store.set_env_prefix(prefix),
            ConfigOption::FilePermissions(mode) => store.set_file_permissions(mode),
            ConfigOption::UseConfigFile => store.use_config_file()?,
            ConfigOption::UseEnvironment => store.use_environment()?,
        }
        Ok(())
    }
}

/// Builder recording [`ConfigOption`]s for [`ConfigStore::with_options`].
#[derive(Debug, Clone, Default)]
pub struct StoreBuilder {
    options: Vec<ConfigOption>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key delimiter.
    pub fn with_key_delimiter(self, delimiter: impl Into<String>) -> Self {
        self.option(ConfigOption::KeyDelimiter(delimiter.into()))
    }

    /// Set the config file path (created on build if missing).
    pub fn with_config_file(self, path: impl Into<PathBuf>) -> Self {
        self.option(ConfigOption::ConfigFile(path.into()))
    }

    /// Set the config name.
    pub fn with_config_name(self, name: impl Into<String>) -> Self {
        self.option(ConfigOption::ConfigName(name.into()))
    }

    /// Set the environment variable prefix.
    pub fn with_env_prefix(self, prefix: impl Into<String>) -> Self {
        self.option(ConfigOption::EnvPrefix(prefix.into()))
    }

    /// Set the permission bits used for created config files.
    pub fn with_file_permissions(self, mode: u32) -> Self {
        self.option(ConfigOption::FilePermissions(mode))
    }

    /// Resolve keys from the config file, loading it during `build`.
    pub fn use_config_file(self) -> Self {
        self.option(ConfigOption::UseConfigFile)
    }

    /// Resolve keys from environment variables.
    pub fn use_environment(self) -> Self {
        self.option(ConfigOption::UseEnvironment)
    }

    /// Append a raw instruction.
    pub fn option(mut self, option: ConfigOption) -> Self {
        self.options.push(option);
        self
    }

    /// Instructions recorded so far.
    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    /// Build the store, applying every recorded instruction in order.
    pub fn build(self) -> Result<ConfigStore, ConfigError> {
        ConfigStore::with_options(self.options)
    }
}
