//! Testing utilities for hoard workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use serde_json::{json, Map, Value};
use tracing_subscriber::EnvFilter;

/// Install a test subscriber honouring `RUST_LOG`; safe to call repeatedly
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn json_record(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not a JSON object: {other}"),
    }
}

/// `[{a:1,b:1}, {a:2,b:2}, {a:1,b:3}]`
pub fn scenario_records() -> Vec<Map<String, Value>> {
    vec![
        json_record(json!({"a": 1, "b": 1})),
        json_record(json!({"a": 2, "b": 2})),
        json_record(json!({"a": 1, "b": 3})),
    ]
}

pub fn people() -> Vec<Map<String, Value>> {
    vec![
        json_record(json!({"name": "ada", "team": "core", "level": 3, "tags": ["rust", "db"]})),
        json_record(json!({"name": "bo", "team": "web", "level": 1, "tags": ["ts"]})),
        json_record(json!({"name": "cy", "team": "core", "level": 2, "tags": ["rust"]})),
        json_record(json!({"name": "di", "team": "ops", "level": 3, "tags": []})),
    ]
}

/// Sorted positions in `all` of the records in `found`, matched by identity
pub fn positions<T>(all: &[T], found: &[&T]) -> Vec<usize> {
    let mut out: Vec<usize> = found
        .iter()
        .map(|f| {
            all.iter()
                .position(|r| std::ptr::eq(r, *f))
                .expect("record not borrowed from collection")
        })
        .collect();
    out.sort_unstable();
    out
}
