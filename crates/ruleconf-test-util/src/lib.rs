//! Shared test utilities for the ruleconf workspace.
//!
//! Lives in its own crate so that integration tests of several crates (and `xtask`) can share
//! the same golden-file normalization.

use serde_json::Value;
use std::path::{Path, PathBuf};

const TIMESTAMP_KEYS: [&str; 3] = ["started_at", "finished_at", "ended_at"];

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` becomes `"__VERSION__"`, only on a root report envelope (an object with
///   `schema`, `tool`, `run`, `verdict`, and `diffs`).
/// - Timestamp keys become `"__TIMESTAMP__"` and `duration_ms` becomes `0`, at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "run", "verdict", "diffs"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_recursive(&mut value);
    value
}

fn normalize_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in TIMESTAMP_KEYS {
                if let Some(v) = map.get_mut(key)
                    && !v.is_null()
                {
                    *v = Value::String("__TIMESTAMP__".to_string());
                }
            }
            if let Some(v) = map.get_mut("duration_ms") {
                *v = Value::Number(0.into());
            }
            for val in map.values_mut() {
                normalize_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_recursive(val);
            }
        }
        _ => {}
    }
}

/// `<repo>/tests/fixtures`, given a crate's `CARGO_MANIFEST_DIR` under `<repo>/crates/`.
pub fn fixtures_dir(manifest_dir: &str) -> PathBuf {
    Path::new(manifest_dir)
        .ancestors()
        .nth(2)
        .unwrap_or_else(|| Path::new("."))
        .join("tests")
        .join("fixtures")
}
