use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub mod path_lists;

/// Locale keyed message tree: `{ "en": { ... }, "ja": { ... } }`.
pub type LocaleMessages = Map<String, Value>;

/// Bundle path pattern -> namespace key.
pub type NamespaceDictionary = BTreeMap<String, String>;

/// Locale messages kept in their serialized form (as exported by a provider).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RawLocaleMessage {
    pub locale: String,
    pub format: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationStatus {
    pub locale: String,
    pub percentage: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TranslationStatus {
    pub fn is_complete(&self) -> bool {
        self.percentage >= 100.0
    }
}

/// Provider configuration file contents (`<provider>-conf.json`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProviderConf {
    #[serde(default)]
    pub provider: Map<String, Value>,
}

impl ProviderConf {
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.provider.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PullArgs {
    pub locales: Vec<String>,
    pub dry_run: bool,
    pub normalize: Option<String>,
    pub format: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PushArgs {
    pub messages: LocaleMessages,
    pub dry_run: bool,
    pub normalize: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ExportArgs {
    pub locales: Vec<String>,
    pub dry_run: bool,
    pub format: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StatusArgs {
    pub locales: Vec<String>,
}

pub fn serialize_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Into::into)
}
