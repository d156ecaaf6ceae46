//! Helpers over locale message trees represented as `serde_json::Value`.

use serde_json::{Map, Value};

/// Merge `source` into `target`.
///
/// Objects merge key by key, recursively. Any other incoming value replaces
/// what was there, so the last writer wins on collisions.
pub fn deep_merge(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Object(target), Value::Object(source)) => deep_merge_map(target, source),
        (target, source) => *target = source,
    }
}

pub fn deep_merge_map(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        match target.get_mut(&key) {
            Some(existing) if existing.is_object() && value.is_object() => {
                deep_merge(existing, value)
            }
            _ => {
                target.insert(key, value);
            }
        }
    }
}

pub fn get_path<'a>(root: &'a Value, path: &[String]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, key| current.as_object()?.get(key))
}

/// Walk `path` from `root`, creating empty objects for missing keys. A
/// non-object value found on the way is replaced by an empty object.
pub fn ensure_object_path<'a>(
    root: &'a mut Map<String, Value>,
    path: &[String],
) -> &'a mut Map<String, Value> {
    let mut current = root;
    for key in path {
        let slot = current
            .entry(key.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            unreachable!("slot was just made an object");
        };
        current = next;
    }
    current
}

/// Detach and return the value at `path`. An empty path never matches.
pub fn remove_path(root: &mut Value, path: &[String]) -> Option<Value> {
    let (last, parents) = path.split_last()?;
    let mut current = root;
    for key in parents {
        current = current.as_object_mut()?.get_mut(key)?;
    }
    current.as_object_mut()?.shift_remove(last)
}

/// Count leaf values that carry content (non-null, non-empty strings).
pub fn count_filled_leaves(value: &Value) -> usize {
    match value {
        Value::Object(map) => map.values().map(count_filled_leaves).sum(),
        Value::Array(items) => items.iter().map(count_filled_leaves).sum(),
        Value::Null => 0,
        Value::String(s) if s.is_empty() => 0,
        _ => 1,
    }
}
