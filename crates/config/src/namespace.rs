//! Case-insensitive dotted-key namespace over nested configuration trees.
//!
//! Responsibilities:
//! - Produce a lower-cased copy of a nested tree.
//! - Flatten a tree into dotted keys with an ordered key list.
//! - Resolve a split key path against a nested tree.
//!
//! Does NOT handle:
//! - Reading or writing files (see `store::file`).
//! - Value conversion (see `value`).
//!
//! Invariants:
//! - Flattened keys are lower-cased; keys differing only by case, or by a
//!   delimiter embedded in a segment name, collide. This is accepted.
//! - The source tree is never mutated; copies are independently owned.
//! - A path descending into a leaf is a miss, not an error.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};

/// Copy `tree`, lower-casing every key at every level.
pub fn copy_and_lowercase(tree: &Map<String, Value>) -> Map<String, Value> {
    tree.iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(nested) => Value::Object(copy_and_lowercase(nested)),
                leaf => leaf.clone(),
            };
            (key.to_lowercase(), value)
        })
        .collect()
}

/// Walk `path` down through nested maps starting at `source`.
///
/// An empty path returns `source` itself, which may be a map.
pub fn search<'a, S: AsRef<str>>(source: &'a Value, path: &[S]) -> Option<&'a Value> {
    let Some((first, rest)) = path.split_first() else {
        return Some(source);
    };

    let next = source.as_object()?.get(first.as_ref())?;
    if rest.is_empty() {
        return Some(next);
    }

    match next {
        Value::Object(_) => search(next, rest),
        _ => None,
    }
}

/// Flat view of a tree: dotted key to leaf value, plus the keys in the
/// order they were recorded.
#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    overrides: HashMap<String, Value>,
    all_keys: Vec<String>,
}

impl FlatIndex {
    /// Flatten `tree` into a fresh index.
    pub fn from_tree(tree: &Map<String, Value>, delimiter: &str) -> Self {
        let mut index = Self::default();
        index.flatten(tree, delimiter);
        index
    }

    /// Flatten `tree` into this index.
    ///
    /// Each call starts with a fresh seen-set, so flattening twice appends
    /// the keys to [`all_keys`](Self::all_keys) a second time.
    pub fn flatten(&mut self, tree: &Map<String, Value>, delimiter: &str) {
        let mut seen = HashSet::new();
        self.flatten_level(tree, "", delimiter, &mut seen);
        tracing::debug!(keys = self.all_keys.len(), "Flattened configuration tree");
    }

    fn flatten_level(
        &mut self,
        tree: &Map<String, Value>,
        prefix: &str,
        delimiter: &str,
        seen: &mut HashSet<String>,
    ) {
        if !prefix.is_empty() && seen.contains(prefix) {
            return;
        }

        for (key, value) in tree {
            let full_key = if prefix.is_empty() {
                key.to_lowercase()
            } else {
                format!("{prefix}{delimiter}{key}").to_lowercase()
            };

            match value {
                Value::Object(nested) => self.flatten_level(nested, &full_key, delimiter, seen),
                leaf => {
                    if seen.insert(full_key.clone()) {
                        self.all_keys.push(full_key.clone());
                        self.overrides.insert(full_key, leaf.clone());
                    }
                }
            }
        }
    }

    /// Leaf value recorded under the lower-cased dotted `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.overrides.get(key)
    }

    /// Keys in the order they were recorded.
    pub fn all_keys(&self) -> &[String] {
        &self.all_keys
    }

    /// Number of distinct leaf keys.
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}
