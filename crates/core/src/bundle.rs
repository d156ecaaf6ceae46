//! Locale messages stored outside the components ("bundles").
//!
//! Each bundle file maps to `locale -> [namespace] -> [filename]` in the
//! squeezed tree. Squeeze merges bundles in; infuse carves them back out.

use crate::error::{LocaleError, Result};
use crate::tree::{deep_merge, get_path, remove_path};
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use sfc_locale_protocol::{LocaleMessages, NamespaceDictionary};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalBundleEntry {
    pub path: PathBuf,
    pub locale: String,
    pub namespace: Option<String>,
    pub filename: Option<String>,
}

impl ExternalBundleEntry {
    /// Keys below the locale root where this file's content lives.
    pub fn key_path(&self) -> Vec<String> {
        self.namespace
            .iter()
            .chain(self.filename.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExternalLocaleMessages {
    pub path: PathBuf,
    pub messages: Value,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SplitLocaleMessages {
    pub sfc: LocaleMessages,
    pub external: Vec<ExternalLocaleMessages>,
}

/// Derives `{locale, filename}` from a bundle file path.
#[derive(Debug, Clone)]
pub struct BundleMatcher {
    regex: Option<Regex>,
}

impl BundleMatcher {
    /// `bundle_match` is a case-insensitive regex whose first group is the
    /// locale and second group the filename key.
    pub fn new(bundle_match: Option<&str>) -> Result<Self> {
        let regex = bundle_match
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| LocaleError::invalid_pattern(pattern, e))
            })
            .transpose()?;
        Ok(Self { regex })
    }

    /// Without a regex the final extension is the locale (`messages.en`).
    pub fn path_info(&self, path: &Path) -> (String, Option<String>) {
        match &self.regex {
            Some(regex) => {
                let full = path.to_string_lossy();
                let Some(caps) = regex.captures(&full) else {
                    return (String::new(), None);
                };
                let locale = caps.get(1).map(|m| m.as_str().to_string());
                let filename = caps
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .filter(|f| !f.is_empty());
                (locale.unwrap_or_default(), filename)
            }
            None => {
                let locale = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .unwrap_or_default()
                    .to_string();
                (locale, None)
            }
        }
    }
}

/// A bundle pattern naming a directory needs `--bundle-match` to tell
/// locales apart.
pub fn validate_bundle_paths(patterns: &[String], bundle_match: Option<&str>) -> Result<()> {
    if bundle_match.is_some_and(|m| !m.is_empty()) {
        return Ok(());
    }
    match patterns.iter().find(|p| Path::new(p.as_str()).is_dir()) {
        Some(dir) => Err(LocaleError::configuration(format!(
            "{dir} is a directory, a regex is required to match its locale message files"
        ))),
        None => Ok(()),
    }
}

/// Files matched by a glob pattern, sorted. A directory expands to the files
/// below it; a literal path resolves to itself when it exists.
pub fn glob_paths(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = glob::glob(pattern).map_err(|e| LocaleError::invalid_pattern(pattern, e))?;
    for entry in entries {
        let path = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            LocaleError::io(path, e.into())
        })?;
        if path.is_dir() {
            paths.extend(
                WalkDir::new(&path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                    .filter(|e| e.file_type().is_file())
                    .map(|e| e.into_path()),
            );
        } else {
            paths.push(path);
        }
    }
    paths.sort();
    paths.dedup();
    Ok(paths)
}

pub fn resolve_bundle_entries(
    dictionary: &NamespaceDictionary,
    bundle_paths: &[String],
    bundle_match: Option<&str>,
) -> Result<Vec<ExternalBundleEntry>> {
    let matcher = BundleMatcher::new(bundle_match)?;
    let mut entries = Vec::new();

    for pattern in bundle_paths {
        let namespace = dictionary
            .get(pattern)
            .filter(|ns| !ns.is_empty())
            .cloned();
        for path in glob_paths(pattern)? {
            let (locale, filename) = matcher.path_info(&path);
            if locale.is_empty() {
                log::debug!("bundle: {} has no locale, skipped", path.display());
                continue;
            }
            entries.push(ExternalBundleEntry {
                path,
                locale,
                namespace: namespace.clone(),
                filename,
            });
        }
    }

    log::debug!("bundle: resolved {} external file(s)", entries.len());
    Ok(entries)
}

/// Read bundle files and merge them into one locale keyed tree.
pub fn get_external_locale_messages(entries: &[ExternalBundleEntry]) -> Result<LocaleMessages> {
    let mut messages = LocaleMessages::new();

    for entry in entries {
        let raw = std::fs::read_to_string(&entry.path).map_err(|e| LocaleError::io(&entry.path, e))?;
        let content: Value = serde_json::from_str(&raw).map_err(|e| {
            LocaleError::configuration(format!(
                "{} is not valid JSON: {e}",
                entry.path.display()
            ))
        })?;

        let wrapped = entry
            .key_path()
            .into_iter()
            .rev()
            .fold(content, |inner, key| {
                let mut map = Map::new();
                map.insert(key, inner);
                Value::Object(map)
            });

        match messages.get_mut(&entry.locale) {
            Some(existing) => deep_merge(existing, wrapped),
            None => {
                messages.insert(entry.locale.clone(), wrapped);
            }
        }
    }

    Ok(messages)
}

/// Carve bundle content out of `tree`. The input is left untouched.
///
/// Missing locale, namespace or filename keys mean there is nothing to
/// extract for that file. Objects emptied by the removal are dropped, up to
/// and including the locale itself.
pub fn split_locale_messages(
    tree: &LocaleMessages,
    entries: &[ExternalBundleEntry],
) -> SplitLocaleMessages {
    let mut sfc = tree.clone();
    let mut external = Vec::new();

    for entry in entries {
        let key_path = entry.key_path();
        let extracted = if key_path.is_empty() {
            sfc.shift_remove(&entry.locale)
        } else {
            sfc.get_mut(&entry.locale)
                .and_then(|root| remove_path(root, &key_path))
        };

        let Some(messages) = extracted else {
            log::debug!(
                "split: nothing to extract for {} ({})",
                entry.path.display(),
                entry.locale
            );
            continue;
        };
        external.push(ExternalLocaleMessages {
            path: entry.path.clone(),
            messages,
        });

        if let Some(root) = sfc.get_mut(&entry.locale) {
            for depth in (1..key_path.len()).rev() {
                let parent = &key_path[..depth];
                let emptied = get_path(root, parent)
                    .and_then(Value::as_object)
                    .is_some_and(Map::is_empty);
                if !emptied {
                    break;
                }
                remove_path(root, parent);
            }
        }

        let emptied = sfc
            .get(&entry.locale)
            .is_some_and(|root| root.as_object().is_some_and(Map::is_empty));
        if emptied {
            sfc.shift_remove(&entry.locale);
        }
    }

    SplitLocaleMessages { sfc, external }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    fn tree(value: Value) -> LocaleMessages {
        match value {
            Value::Object(map) => map,
            _ => panic!("tree must be an object"),
        }
    }

    fn entry(path: &str, locale: &str, ns: Option<&str>, filename: Option<&str>) -> ExternalBundleEntry {
        ExternalBundleEntry {
            path: PathBuf::from(path),
            locale: locale.to_string(),
            namespace: ns.map(str::to_string),
            filename: filename.map(str::to_string),
        }
    }

    #[test]
    fn matcher_uses_regex_groups_or_extension() {
        let matcher = BundleMatcher::new(Some(r"locales/([\w-]+)/(\w+)\.json$")).unwrap();
        assert_eq!(
            matcher.path_info(Path::new("/app/LOCALES/en/common.json")),
            ("en".to_string(), Some("common".to_string()))
        );
        assert_eq!(
            matcher.path_info(Path::new("/app/other/en.json")),
            (String::new(), None)
        );

        let by_extension = BundleMatcher::new(None).unwrap();
        assert_eq!(
            by_extension.path_info(Path::new("/app/messages.ja")),
            ("ja".to_string(), None)
        );

        assert!(BundleMatcher::new(Some("(unclosed")).is_err());
    }

    #[test]
    fn merges_external_files_under_namespace_and_filename() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("locales");
        fs::create_dir_all(dir.join("en")).unwrap();
        fs::create_dir_all(dir.join("ja")).unwrap();
        fs::write(dir.join("en/common.json"), r#"{"ok": "OK"}"#).unwrap();
        fs::write(dir.join("en/errors.json"), r#"{"fatal": "Fatal"}"#).unwrap();
        fs::write(dir.join("ja/common.json"), r#"{"ok": "はい"}"#).unwrap();

        let pattern = format!("{}/*/*.json", dir.display());
        let mut dictionary = NamespaceDictionary::new();
        dictionary.insert(pattern.clone(), "shared".to_string());

        let entries =
            resolve_bundle_entries(&dictionary, &[pattern], Some(r"/(\w+)/(\w+)\.json$")).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.namespace.as_deref() == Some("shared")));

        let messages = get_external_locale_messages(&entries).unwrap();
        assert_eq!(
            Value::Object(messages),
            json!({
                "en": {"shared": {"common": {"ok": "OK"}, "errors": {"fatal": "Fatal"}}},
                "ja": {"shared": {"common": {"ok": "はい"}}}
            })
        );
    }

    #[test]
    fn split_removes_external_content_and_empty_locales() {
        let original = tree(json!({
            "en": {
                "App": {"title": "App"},
                "shared": {"common": {"ok": "OK"}, "errors": {"fatal": "Fatal"}}
            },
            "ja": {"shared": {"common": {"ok": "はい"}}}
        }));
        let entries = vec![
            entry("/l/en/common.json", "en", Some("shared"), Some("common")),
            entry("/l/ja/common.json", "ja", Some("shared"), Some("common")),
            entry("/l/fr/common.json", "fr", Some("shared"), Some("common")),
        ];

        let split = split_locale_messages(&original, &entries);
        assert_eq!(
            Value::Object(split.sfc.clone()),
            json!({"en": {"App": {"title": "App"}, "shared": {"errors": {"fatal": "Fatal"}}}})
        );
        assert_eq!(
            split.external,
            vec![
                ExternalLocaleMessages {
                    path: PathBuf::from("/l/en/common.json"),
                    messages: json!({"ok": "OK"}),
                },
                ExternalLocaleMessages {
                    path: PathBuf::from("/l/ja/common.json"),
                    messages: json!({"ok": "はい"}),
                },
            ]
        );
        // input untouched
        assert!(original["en"]["shared"]["common"].is_object());
    }

    #[test]
    fn split_prunes_namespaces_left_empty() {
        let original = tree(json!({
            "en": {"App": {"title": "App"}, "shared": {"common": {"ok": "OK"}}},
            "ja": {"shared": {"common": {"ok": "はい"}}}
        }));
        let entries = vec![
            entry("/l/en/common.json", "en", Some("shared"), Some("common")),
            entry("/l/ja/common.json", "ja", Some("shared"), Some("common")),
        ];

        let split = split_locale_messages(&original, &entries);
        assert_eq!(
            Value::Object(split.sfc),
            json!({"en": {"App": {"title": "App"}}})
        );
    }

    #[test]
    fn split_without_keys_takes_whole_locale() {
        let original = tree(json!({"en": {"a": 1}, "ja": {"a": 2}}));
        let split = split_locale_messages(&original, &[entry("/l/messages.ja", "ja", None, None)]);
        assert_eq!(Value::Object(split.sfc), json!({"en": {"a": 1}}));
        assert_eq!(split.external[0].messages, json!({"a": 2}));
    }

    #[test]
    fn split_then_merge_reproduces_tree() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        fs::write(dir.join("common.en"), "{}").unwrap();
        fs::write(dir.join("common.ja"), "{}").unwrap();
        let pattern = format!("{}/common.*", dir.display());
        let mut dictionary = NamespaceDictionary::new();
        dictionary.insert(pattern.clone(), "common".to_string());

        let original = tree(json!({
            "en": {"Widget": {"hi": "Hi"}, "common": {"yes": "Yes", "no": "No"}},
            "ja": {"common": {"yes": "はい"}}
        }));
        let entries = resolve_bundle_entries(&dictionary, &[pattern], None).unwrap();
        let split = split_locale_messages(&original, &entries);
        assert_eq!(split.external.len(), 2);

        for external in &split.external {
            fs::write(&external.path, serde_json::to_string(&external.messages).unwrap()).unwrap();
        }
        let mut rebuilt = Value::Object(split.sfc);
        deep_merge(
            &mut rebuilt,
            Value::Object(get_external_locale_messages(&entries).unwrap()),
        );
        assert_eq!(rebuilt, Value::Object(original));
    }

    #[test]
    fn directory_bundle_requires_regex() {
        let temp = tempdir().unwrap();
        let dir = temp.path().display().to_string();
        let err = validate_bundle_paths(&[dir.clone()], None).unwrap_err();
        assert!(matches!(err, LocaleError::Configuration(_)));
        assert!(validate_bundle_paths(&[dir], Some(r"(\w+)\.json")).is_ok());
        assert!(validate_bundle_paths(&["nope/*.json".to_string()], None).is_ok());
    }
}
