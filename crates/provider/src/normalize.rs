use serde_json::{Map, Value};
use sfc_locale_core::tree::ensure_object_path;
use sfc_locale_core::{LocaleError, Result};

/// Message layout a provider exchanges with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalize {
    /// Nested objects, as stored in components.
    #[default]
    Hierarchy,
    /// One level of dotted keys (`a.b.c`).
    Flat,
}

impl Normalize {
    pub fn from_option(option: Option<&str>) -> Result<Self> {
        match option.map(str::trim) {
            None | Some("") | Some("hierarchy") => Ok(Self::Hierarchy),
            Some("flat") => Ok(Self::Flat),
            Some(other) => Err(LocaleError::configuration(format!(
                "unsupported normalize option: {other} (expected flat or hierarchy)"
            ))),
        }
    }
}

/// Key paths of every non-object value under `value`. Arrays count as leaves.
pub fn leaf_paths(value: &Value) -> Vec<Vec<String>> {
    let mut paths = Vec::new();
    collect_leaves(value, &mut Vec::new(), &mut paths);
    paths
}

fn collect_leaves(value: &Value, prefix: &mut Vec<String>, out: &mut Vec<Vec<String>>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                prefix.push(key.clone());
                collect_leaves(child, prefix, out);
                prefix.pop();
            }
        }
        _ if prefix.is_empty() => {}
        _ => out.push(prefix.clone()),
    }
}

pub fn flatten(value: &Value) -> Value {
    let mut flat = Map::new();
    for path in leaf_paths(value) {
        let leaf = path
            .iter()
            .try_fold(value, |current, key| current.get(key))
            .cloned()
            .unwrap_or(Value::Null);
        flat.insert(path.join("."), leaf);
    }
    Value::Object(flat)
}

/// Inverse of [`flatten`]. Non-object input is returned as is.
pub fn unflatten(value: &Value) -> Value {
    let Value::Object(flat) = value else {
        return value.clone();
    };
    let mut nested = Map::new();
    for (key, leaf) in flat {
        let path: Vec<String> = key.split('.').map(str::to_string).collect();
        let Some((last, parents)) = path.split_last() else {
            continue;
        };
        ensure_object_path(&mut nested, parents).insert(last.clone(), leaf.clone());
    }
    Value::Object(nested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn flatten_and_unflatten() {
        let nested = json!({"a": {"b": {"c": "x"}, "list": [1, 2]}, "top": "y"});
        let flat = flatten(&nested);
        assert_eq!(flat, json!({"a.b.c": "x", "a.list": [1, 2], "top": "y"}));
        assert_eq!(unflatten(&flat), nested);
    }

    #[test]
    fn leaf_paths_skip_empty_objects() {
        let paths = leaf_paths(&json!({"a": {}, "b": {"c": null}}));
        assert_eq!(paths, vec![vec!["b".to_string(), "c".to_string()]]);
        assert!(leaf_paths(&json!("scalar")).is_empty());
    }

    #[test]
    fn normalize_option() {
        assert_eq!(Normalize::from_option(None).unwrap(), Normalize::Hierarchy);
        assert_eq!(Normalize::from_option(Some("flat")).unwrap(), Normalize::Flat);
        assert!(Normalize::from_option(Some("snake")).is_err());
    }
}
