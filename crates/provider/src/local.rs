//! Provider backed by a directory of `<locale>.json` files.
//!
//! Stands in for a remote translation service: `push` uploads into the
//! directory, `pull`/`export` read from it, and `status` measures how much of
//! the base locale every other locale covers.

use crate::normalize::{flatten, leaf_paths, unflatten, Normalize};
use crate::LocalizationProvider;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use sfc_locale_core::tree::{count_filled_leaves, get_path};
use sfc_locale_core::{Format, LocaleError, Result};
use sfc_locale_protocol::{
    ExportArgs, LocaleMessages, ProviderConf, PullArgs, PushArgs, RawLocaleMessage, StatusArgs,
    TranslationStatus,
};
use std::path::PathBuf;

const DEFAULT_BASE_LOCALE: &str = "en";

#[derive(Debug, Clone)]
pub struct LocalProvider {
    dir: PathBuf,
    base_locale: String,
}

impl LocalProvider {
    pub const NAME: &'static str = "local";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            base_locale: DEFAULT_BASE_LOCALE.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_locale(mut self, locale: impl Into<String>) -> Self {
        self.base_locale = locale.into();
        self
    }

    /// Reads `provider.dir` (required) and `provider.baseLocale`.
    pub fn from_conf(conf: &ProviderConf) -> Result<Self> {
        let dir = conf
            .get_str("dir")
            .filter(|dir| !dir.is_empty())
            .ok_or_else(|| {
                LocaleError::configuration("local provider requires `provider.dir` in its conf")
            })?;
        let mut provider = Self::new(dir);
        if let Some(base) = conf.get_str("baseLocale") {
            provider = provider.with_base_locale(base);
        }
        Ok(provider)
    }

    fn locale_path(&self, locale: &str) -> PathBuf {
        self.dir.join(format!("{locale}.json"))
    }

    async fn read_store(&self, locales: &[String]) -> Result<LocaleMessages> {
        let mut messages = LocaleMessages::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("local store {} does not exist yet", self.dir.display());
                return Ok(messages);
            }
            Err(e) => return Err(LocaleError::io(&self.dir, e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| LocaleError::io(&self.dir, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string)
            else {
                continue;
            };
            if locales.is_empty() || locales.contains(&locale) {
                files.push((locale, path));
            }
        }
        files.sort();

        for (locale, path) in files {
            let raw = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| LocaleError::io(&path, e))?;
            let content: Value = serde_json::from_str(&raw)
                .map_err(|e| LocaleError::provider(Self::NAME, format!("{}: {e}", path.display())))?;
            messages.insert(locale, content);
        }
        Ok(messages)
    }
}

#[async_trait]
impl LocalizationProvider for LocalProvider {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn pull(&self, args: PullArgs) -> Result<LocaleMessages> {
        let normalize = Normalize::from_option(args.normalize.as_deref())?;
        let mut messages = self.read_store(&args.locales).await?;
        if normalize == Normalize::Flat {
            for content in messages.values_mut() {
                *content = flatten(content);
            }
        }
        log::debug!("pulled {} locale(s) from {}", messages.len(), self.dir.display());
        Ok(messages)
    }

    async fn push(&self, args: PushArgs) -> Result<()> {
        let normalize = Normalize::from_option(args.normalize.as_deref())?;
        if !args.dry_run {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| LocaleError::io(&self.dir, e))?;
        }

        for (locale, content) in &args.messages {
            let content = match normalize {
                Normalize::Flat => unflatten(content),
                Normalize::Hierarchy => content.clone(),
            };
            let path = self.locale_path(locale);
            if args.dry_run {
                log::info!("dry run: would push '{locale}' to {}", path.display());
                continue;
            }
            let text = Format::Json.stringify(&content)?;
            tokio::fs::write(&path, text)
                .await
                .map_err(|e| LocaleError::io(&path, e))?;
            log::debug!("pushed '{locale}' to {}", path.display());
        }
        Ok(())
    }

    async fn export(&self, args: ExportArgs) -> Result<Vec<RawLocaleMessage>> {
        let format = if args.format.is_empty() {
            Format::Json
        } else {
            Format::parse_option(&args.format)?
        };
        let messages = self.read_store(&args.locales).await?;
        messages
            .iter()
            .map(|(locale, content)| {
                Ok(RawLocaleMessage {
                    locale: locale.clone(),
                    format: format.as_str().to_string(),
                    data: format.stringify(content)?.into_bytes(),
                })
            })
            .collect()
    }

    async fn status(&self, args: StatusArgs) -> Result<Vec<TranslationStatus>> {
        let store = self.read_store(&[]).await?;
        let base = store.get(&self.base_locale).ok_or_else(|| {
            LocaleError::provider(
                Self::NAME,
                format!("base locale '{}' not found in {}", self.base_locale, self.dir.display()),
            )
        })?;
        let keys: Vec<_> = leaf_paths(base)
            .into_iter()
            .filter(|path| get_path(base, path).is_some_and(|v| count_filled_leaves(v) > 0))
            .collect();

        let mut statuses = Vec::new();
        for (locale, content) in &store {
            if !args.locales.is_empty() && !args.locales.contains(locale) {
                continue;
            }
            let translated = keys
                .iter()
                .filter(|path| get_path(content, path).is_some_and(|v| count_filled_leaves(v) > 0))
                .count();
            let percentage = if keys.is_empty() {
                100.0
            } else {
                (translated as f64 * 10000.0 / keys.len() as f64).round() / 100.0
            };
            let mut extra = Map::new();
            extra.insert("translated".to_string(), json!(translated));
            extra.insert("total".to_string(), json!(keys.len()));
            statuses.push(TranslationStatus {
                locale: locale.clone(),
                percentage,
                extra,
            });
        }
        Ok(statuses)
    }
}
