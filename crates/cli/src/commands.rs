//! Subcommand implementations.
//!
//! Each command writes its result to the given writer so tests can capture
//! output without spawning the binary.

use std::io::Write;

use anyhow::{Context, Result};
use flatconf::{ConfigStore, Value};
use serde::Serialize;

use crate::args::ValueKind;

/// JSON shape printed by `keys --json`.
#[derive(Debug, Serialize)]
struct KeysReport<'a> {
    source: String,
    config_file: Option<String>,
    keys: &'a [String],
}

pub fn run_keys(store: &ConfigStore, json: bool, out: &mut impl Write) -> Result<()> {
    let keys = store.all_keys();
    tracing::debug!(count = keys.len(), "Listing keys");

    if json {
        let report = KeysReport {
            source: store.source_mode().to_string(),
            config_file: store
                .is_loaded()
                .then(|| store.config_file().display().to_string()),
            keys,
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("Failed to serialize keys")?;
        writeln!(out)?;
        return Ok(());
    }

    for key in keys {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

pub fn run_get(
    store: &ConfigStore,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let default = default.map(parse_default).unwrap_or(Value::Null);

    match kind {
        ValueKind::String => writeln!(out, "{}", store.get_string(key, default))?,
        ValueKind::Int => writeln!(out, "{}", store.get_int(key, default))?,
        ValueKind::Int64 => writeln!(out, "{}", store.get_int64(key, default))?,
        ValueKind::Float => writeln!(out, "{}", store.get_float(key, default))?,
        ValueKind::Bool => writeln!(out, "{}", store.get_bool(key, default))?,
        ValueKind::Slice => {
            for item in store.get_slice(key, default) {
                writeln!(out, "{}", item)?;
            }
        }
        ValueKind::Json => {
            let value = store.get(key, default);
            writeln!(out, "{}", serde_json::to_string(&value)?)?;
        }
    }
    Ok(())
}

/// Interpret `--default` as JSON when it parses, otherwise as a plain string.
fn parse_default(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(document: &str) -> ConfigStore {
        let mut store = ConfigStore::builder().use_environment().build().unwrap();
        store.unmarshal(document.as_bytes()).unwrap();
        store
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_default_accepts_json_and_plain_text() {
        assert_eq!(parse_default("8080"), Value::from(8080));
        assert_eq!(parse_default("[\"a\",\"b\"]"), serde_json::json!(["a", "b"]));
        assert_eq!(parse_default("localhost"), Value::from("localhost"));
    }

    #[test]
    fn test_get_renders_each_kind() {
        let store = store_with(r#"{"Db": {"Port": 1443, "Hosts": ["a", "b"], "Ratio": 0.5}}"#);

        let get = |kind| render(|out| run_get(&store, "db.port", kind, None, out));
        assert_eq!(get(ValueKind::String), "1443\n");
        assert_eq!(get(ValueKind::Int), "1443\n");
        assert_eq!(get(ValueKind::Bool), "true\n");
        assert_eq!(
            render(|out| run_get(&store, "db.hosts", ValueKind::Slice, None, out)),
            "a\nb\n"
        );
        assert_eq!(
            render(|out| run_get(&store, "db.ratio", ValueKind::Float, None, out)),
            "0.5\n"
        );
        assert_eq!(
            render(|out| run_get(&store, "db", ValueKind::Json, None, out)),
            "{\"hosts\":[\"a\",\"b\"],\"port\":1443,\"ratio\":0.5}\n"
        );
    }

    #[test]
    fn test_get_falls_back_to_default() {
        let store = store_with("{}");
        assert_eq!(
            render(|out| run_get(&store, "_flatconf_cli_missing", ValueKind::Int, Some("7"), out)),
            "7\n"
        );
        assert_eq!(
            render(|out| run_get(&store, "_flatconf_cli_missing", ValueKind::String, None, out)),
            "\n"
        );
    }

    #[test]
    fn test_keys_lists_flattened_keys() {
        let store = store_with(r#"{"A": {"B": 1}, "C": 2}"#);
        assert_eq!(render(|out| run_keys(&store, false, out)), "a.b\nc\n");

        let report: Value = serde_json::from_str(&render(|out| run_keys(&store, true, out))).unwrap();
        assert_eq!(report["source"], "environment");
        assert_eq!(report["config_file"], Value::Null);
        assert_eq!(report["keys"], serde_json::json!(["a.b", "c"]));
    }
}
