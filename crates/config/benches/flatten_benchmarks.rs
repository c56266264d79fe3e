//! Benchmarks for key flattening and store lookups.
//!
//! Covers wide and deep documents through the public API.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use flatconf::namespace::{copy_and_lowercase, search};
use flatconf::{ConfigStore, FlatIndex, Map, Value};

fn generate_wide_tree(keys: usize) -> Map<String, Value> {
    (0..keys)
        .map(|i| (format!("Key_{}", i), serde_json::json!(i)))
        .collect()
}

fn generate_nested_tree(sections: usize, depth: usize) -> Map<String, Value> {
    let mut tree = Map::new();
    for section in 0..sections {
        let mut node = serde_json::json!({ "leaf": section, "name": format!("section_{}", section) });
        for level in (0..depth).rev() {
            node = serde_json::json!({ format!("Level{}", level): node });
        }
        tree.insert(format!("Section{}", section), node);
    }
    tree
}

fn bench_flatten_wide_1k(c: &mut Criterion) {
    let tree = generate_wide_tree(1_000);
    c.bench_function("flatten_wide_1k", |b| {
        b.iter(|| black_box(FlatIndex::from_tree(black_box(&tree), ".")))
    });
}

fn bench_flatten_nested_100x5(c: &mut Criterion) {
    let tree = generate_nested_tree(100, 5);
    c.bench_function("flatten_nested_100x5", |b| {
        b.iter(|| black_box(FlatIndex::from_tree(black_box(&tree), ".")))
    });
}

fn bench_lowercase_copy_nested(c: &mut Criterion) {
    let tree = generate_nested_tree(100, 5);
    c.bench_function("lowercase_copy_nested_100x5", |b| {
        b.iter(|| black_box(copy_and_lowercase(black_box(&tree))))
    });
}

fn bench_search_deep_path(c: &mut Criterion) {
    let tree = Value::Object(copy_and_lowercase(&generate_nested_tree(100, 5)));
    let path = [
        "section42", "level0", "level1", "level2", "level3", "level4", "leaf",
    ];
    c.bench_function("search_deep_path", |b| {
        b.iter(|| black_box(search(black_box(&tree), black_box(path.as_slice()))))
    });
}

fn bench_store_get_int(c: &mut Criterion) {
    let document = Value::Object(generate_nested_tree(100, 2)).to_string();
    let mut store = ConfigStore::builder()
        .use_environment()
        .build()
        .expect("environment store");
    store.unmarshal(document.as_bytes()).expect("valid document");
    c.bench_function("store_get_int_nested", |b| {
        b.iter(|| black_box(store.get_int(black_box("SECTION7.LEVEL0.LEVEL1.LEAF"), 0)))
    });
}

criterion_group!(
    benches,
    bench_flatten_wide_1k,
    bench_flatten_nested_100x5,
    bench_lowercase_copy_nested,
    bench_search_deep_path,
    bench_store_get_int,
);
criterion_main!(benches);
