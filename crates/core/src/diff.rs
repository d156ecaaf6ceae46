//! Structural diff between two message trees, and in-place application of
//! that diff so untouched keys keep their position and formatting.

use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChangeKind {
    New { rhs: Value },
    Edited { lhs: Value, rhs: Value },
    Deleted { lhs: Value },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub path: Vec<PathSegment>,
    pub kind: ChangeKind,
}

impl Change {
    /// Dotted path such as `a.b[2].c`, `<root>` for the whole value.
    pub fn path_string(&self) -> String {
        if self.path.is_empty() {
            return "<root>".to_string();
        }
        let mut out = String::new();
        for segment in &self.path {
            if matches!(segment, PathSegment::Key(_)) && !out.is_empty() {
                out.push('.');
            }
            out.push_str(&segment.to_string());
        }
        out
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path_string();
        match &self.kind {
            ChangeKind::New { rhs } => write!(f, "+ {path}: {rhs}"),
            ChangeKind::Deleted { lhs } => write!(f, "- {path}: {lhs}"),
            ChangeKind::Edited { lhs, rhs } => write!(f, "~ {path}: {lhs} -> {rhs}"),
        }
    }
}

/// Changes turning `lhs` into `rhs`.
pub fn diff(lhs: &Value, rhs: &Value) -> Vec<Change> {
    let mut changes = Vec::new();
    let mut path = Vec::new();
    diff_into(lhs, rhs, &mut path, &mut changes);
    changes
}

fn diff_into(lhs: &Value, rhs: &Value, path: &mut Vec<PathSegment>, out: &mut Vec<Change>) {
    match (lhs, rhs) {
        (Value::Object(left), Value::Object(right)) => {
            for (key, left_value) in left {
                path.push(PathSegment::Key(key.clone()));
                match right.get(key) {
                    Some(right_value) => diff_into(left_value, right_value, path, out),
                    None => out.push(Change {
                        path: path.clone(),
                        kind: ChangeKind::Deleted {
                            lhs: left_value.clone(),
                        },
                    }),
                }
                path.pop();
            }
            for (key, right_value) in right {
                if left.contains_key(key) {
                    continue;
                }
                path.push(PathSegment::Key(key.clone()));
                out.push(Change {
                    path: path.clone(),
                    kind: ChangeKind::New {
                        rhs: right_value.clone(),
                    },
                });
                path.pop();
            }
        }
        (Value::Array(left), Value::Array(right)) => {
            let shared = left.len().min(right.len());
            for index in 0..shared {
                path.push(PathSegment::Index(index));
                diff_into(&left[index], &right[index], path, out);
                path.pop();
            }
            // deletions from the tail first so indices stay valid while applying
            for index in (shared..left.len()).rev() {
                path.push(PathSegment::Index(index));
                out.push(Change {
                    path: path.clone(),
                    kind: ChangeKind::Deleted {
                        lhs: left[index].clone(),
                    },
                });
                path.pop();
            }
            for (index, item) in right.iter().enumerate().skip(shared) {
                path.push(PathSegment::Index(index));
                out.push(Change {
                    path: path.clone(),
                    kind: ChangeKind::New { rhs: item.clone() },
                });
                path.pop();
            }
        }
        _ if lhs != rhs => out.push(Change {
            path: path.clone(),
            kind: ChangeKind::Edited {
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            },
        }),
        _ => {}
    }
}

/// Apply one change. Returns `false` when the parent path no longer exists.
pub fn apply_change(target: &mut Value, change: &Change) -> bool {
    let Some((last, parents)) = change.path.split_last() else {
        match &change.kind {
            ChangeKind::New { rhs } | ChangeKind::Edited { rhs, .. } => *target = rhs.clone(),
            ChangeKind::Deleted { .. } => *target = Value::Null,
        }
        return true;
    };

    let mut current = target;
    for segment in parents {
        let next = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get_mut(key),
            (PathSegment::Index(index), Value::Array(items)) => items.get_mut(*index),
            _ => None,
        };
        let Some(next) = next else {
            log::debug!("diff path {} vanished while applying", change.path_string());
            return false;
        };
        current = next;
    }

    match (last, current, &change.kind) {
        (PathSegment::Key(key), Value::Object(map), ChangeKind::Deleted { .. }) => {
            map.shift_remove(key);
        }
        (
            PathSegment::Key(key),
            Value::Object(map),
            ChangeKind::New { rhs } | ChangeKind::Edited { rhs, .. },
        ) => {
            map.insert(key.clone(), rhs.clone());
        }
        (PathSegment::Index(index), Value::Array(items), ChangeKind::Deleted { .. }) => {
            if *index < items.len() {
                items.remove(*index);
            }
        }
        (PathSegment::Index(index), Value::Array(items), ChangeKind::New { rhs }) => {
            let at = (*index).min(items.len());
            items.insert(at, rhs.clone());
        }
        (PathSegment::Index(index), Value::Array(items), ChangeKind::Edited { rhs, .. }) => {
            match items.get_mut(*index) {
                Some(slot) => *slot = rhs.clone(),
                None => return false,
            }
        }
        _ => return false,
    }
    true
}

/// Patch `target` in place until it equals `source`; returns what changed.
pub fn apply_diff(target: &mut Value, source: &Value) -> Vec<Change> {
    let changes = diff(target, source);
    for change in &changes {
        apply_change(target, change);
    }
    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn identical_values_have_no_changes() {
        let value = json!({"a": {"b": [1, 2, {"c": "d"}]}});
        assert!(diff(&value, &value).is_empty());
    }

    #[test]
    fn reports_new_edited_and_deleted_keys() {
        let lhs = json!({"keep": 1, "edit": "old", "gone": true});
        let rhs = json!({"keep": 1, "edit": "new", "added": {"x": 1}});
        let rendered: Vec<String> = diff(&lhs, &rhs).iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec![
                "~ edit: \"old\" -> \"new\"".to_string(),
                "- gone: true".to_string(),
                "+ added: {\"x\":1}".to_string(),
            ]
        );
    }

    #[test]
    fn apply_diff_preserves_untouched_key_order() {
        let mut target = json!({"z": "1", "m": {"inner": "a", "drop": "b"}, "a": "3"});
        let source = json!({"a": "3", "m": {"inner": "A"}, "z": "1", "n": "new"});
        let changes = apply_diff(&mut target, &source);
        assert_eq!(changes.len(), 3);
        assert_eq!(target, source);
        let keys: Vec<_> = target.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "m", "a", "n"]);
    }

    #[test]
    fn arrays_grow_and_shrink() {
        let mut shrink = json!({"list": [1, 2, 3, 4]});
        apply_diff(&mut shrink, &json!({"list": [1, 9]}));
        assert_eq!(shrink, json!({"list": [1, 9]}));

        let mut grow = json!({"list": [1]});
        apply_diff(&mut grow, &json!({"list": [1, 2, 3]}));
        assert_eq!(grow, json!({"list": [1, 2, 3]}));
    }

    #[test]
    fn type_change_replaces_whole_value() {
        let mut target = json!({"a": {"b": 1}});
        let changes = apply_diff(&mut target, &json!({"a": "flat"}));
        assert_eq!(changes.len(), 1);
        assert_eq!(target, json!({"a": "flat"}));

        let mut root = json!("text");
        apply_diff(&mut root, &json!({"now": "object"}));
        assert_eq!(root, json!({"now": "object"}));
    }

    #[test]
    fn path_string_mixes_keys_and_indices() {
        let change = Change {
            path: vec![
                PathSegment::Key("a".into()),
                PathSegment::Index(2),
                PathSegment::Key("b".into()),
            ],
            kind: ChangeKind::Deleted { lhs: json!(1) },
        };
        assert_eq!(change.path_string(), "a[2].b");
    }
}
