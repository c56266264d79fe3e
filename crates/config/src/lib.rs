//! In-process configuration store for flatconf.
//!
//! This crate loads key/value settings from a JSON file or from environment
//! variables, flattens nested objects into case-insensitive dotted keys, and
//! exposes typed accessors that always return a value.

pub mod constants;
pub mod global;
pub mod namespace;
mod store;
pub mod value;

pub use namespace::FlatIndex;
pub use store::{
    ConfigError, ConfigOption, ConfigStore, SourceMode, StoreBuilder, env_var_or_none, load_dotenv,
};
pub use value::CastError;

/// Re-exported so callers can build defaults without depending on `serde_json`.
pub use serde_json::{Map, Value};
