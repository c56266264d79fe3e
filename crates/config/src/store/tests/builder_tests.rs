//! Tests for option-based construction of the configuration store.

use tempfile::TempDir;

use crate::constants::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_NAME, DEFAULT_FILE_PERMISSIONS};
use crate::store::{ConfigError, ConfigOption, ConfigStore, SourceMode, StoreBuilder};

#[test]
fn test_new_store_defaults() {
    let store = ConfigStore::new();

    assert_eq!(store.key_delimiter(), ".");
    assert_eq!(store.config_name(), DEFAULT_CONFIG_NAME);
    assert_eq!(store.config_file(), std::path::Path::new(DEFAULT_CONFIG_FILE));
    assert_eq!(store.file_permissions(), DEFAULT_FILE_PERMISSIONS);
    assert_eq!(store.env_prefix(), None);
    assert_eq!(store.source_mode(), SourceMode::File);
    assert!(!store.is_loaded());
}

#[test]
fn test_builder_records_options_in_order() {
    let builder = StoreBuilder::new()
        .with_key_delimiter(":")
        .with_config_name("app")
        .with_env_prefix("svc")
        .use_environment();

    assert_eq!(
        builder.options(),
        [
            ConfigOption::KeyDelimiter(":".to_string()),
            ConfigOption::ConfigName("app".to_string()),
            ConfigOption::EnvPrefix("svc".to_string()),
            ConfigOption::UseEnvironment,
        ]
    );

    let store = builder.build().unwrap();
    assert_eq!(store.key_delimiter(), ":");
    assert_eq!(store.config_name(), "app");
    assert_eq!(store.env_prefix(), Some("svc"));
    assert_eq!(store.source_mode(), SourceMode::Environment);
}

#[test]
fn test_with_options_applies_file_settings() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("orders.json");

    let store = ConfigStore::with_options([
        ConfigOption::FilePermissions(0o640),
        ConfigOption::ConfigFile(path.clone()),
        ConfigOption::UseConfigFile,
    ])
    .unwrap();

    assert!(path.exists());
    assert_eq!(store.config_name(), "orders");
    assert_eq!(store.file_permissions(), 0o640);
    assert!(store.is_loaded());
}

#[test]
fn test_later_options_override_earlier_ones() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("first.json");

    let store = StoreBuilder::new()
        .with_config_file(path)
        .with_config_name("renamed")
        .build()
        .unwrap();

    assert_eq!(store.config_name(), "renamed");
}

#[test]
fn test_empty_inputs_are_ignored() {
    let store = StoreBuilder::new()
        .with_key_delimiter("")
        .with_env_prefix("")
        .with_config_file("")
        .build()
        .unwrap();

    assert_eq!(store.key_delimiter(), ".");
    assert_eq!(store.env_prefix(), None);
    assert_eq!(store.config_name(), DEFAULT_CONFIG_NAME);
}

#[test]
fn test_file_permissions_keep_permission_bits_only() {
    let mut store = ConfigStore::new();
    store.set_file_permissions(0o104_755);
    assert_eq!(store.file_permissions(), 0o755);
}

#[test]
fn test_conflicting_source_options_fail() {
    let result = StoreBuilder::new()
        .use_environment()
        .use_config_file()
        .build();

    assert!(matches!(
        result,
        Err(ConfigError::SourceModeLocked { .. })
    ));
}
