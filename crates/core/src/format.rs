use crate::error::{LocaleError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// Serialization language of a locale messages block or file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Json,
    Json5,
    Yaml,
}

impl Format {
    /// Strict lookup, used for user supplied `--format` values.
    pub fn from_lang(lang: &str) -> Option<Self> {
        match lang.trim().to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "json5" => Some(Self::Json5),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Lenient lookup for block `lang` attributes: anything unknown is JSON.
    pub fn from_lang_or_default(lang: &str) -> Self {
        Self::from_lang(lang).unwrap_or_default()
    }

    pub fn parse_option(lang: &str) -> Result<Self> {
        Self::from_lang(lang).ok_or_else(|| LocaleError::UnsupportedFormat(lang.to_string()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_lang)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Json5 => "json5",
            Self::Yaml => "yaml",
        }
    }

    pub const fn extension(self) -> &'static str {
        self.as_str()
    }

    /// Parse text in this format. Errors are returned as plain messages so the
    /// caller can attach the file and block they came from.
    pub fn parse(self, content: &str) -> std::result::Result<Value, String> {
        match self {
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            Self::Json5 => json5::from_str(content).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        }
    }

    /// Serialize with a 2-space indent and a trailing newline.
    pub fn stringify(self, value: &Value) -> Result<String> {
        let mut out = match self {
            // JSON is valid JSON5, and keeps quoting stable across round trips
            Self::Json | Self::Json5 => serde_json::to_string_pretty(value)?,
            Self::Yaml => serde_yaml::to_string(value)?,
        };
        if !out.ends_with('\n') {
            out.push('\n');
        }
        Ok(out)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
