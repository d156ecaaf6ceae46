pub mod diff;
pub mod export;
pub mod infuse;
pub mod pull;
pub mod push;
pub mod squeeze;
pub mod status;

use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::{load_namespace_dictionary, LocaleError, NamespaceDictionary};
use sfc_locale_provider::{
    load_provider_conf, resolve_provider_conf, LocalizationProvider, ProviderRegistry,
};
use std::env;
use std::path::{Path, PathBuf};

/// Options shared by every command that talks to a localization service.
#[derive(Args, Debug, Clone)]
pub struct ProviderOptions {
    /// The target localization service provider
    #[arg(short, long)]
    pub provider: String,

    /// Provider configuration file (defaults to `<provider>-conf.json`)
    #[arg(short, long)]
    pub conf: Option<PathBuf>,
}

impl ProviderOptions {
    pub fn create(&self) -> Result<Box<dyn LocalizationProvider>> {
        let registry = ProviderRegistry::with_builtin();
        if !registry.contains(&self.provider) {
            log::debug!("known providers: {}", registry.names().join(", "));
            return Err(LocaleError::ProviderNotFound(self.provider.clone()).into());
        }

        let cwd = env::current_dir().context("Failed to resolve working directory")?;
        let conf_path = resolve_provider_conf(&self.provider, self.conf.as_deref(), &cwd);
        log::debug!("provider conf: {}", conf_path.display());
        let conf = load_provider_conf(&conf_path)?;
        Ok(registry.create(&self.provider, conf)?)
    }
}

/// Local message files for `push` and `diff`.
#[derive(Args, Debug, Clone)]
pub struct LocalTargetOptions {
    /// Locale messages file; its file stem is the locale unless --locale is given
    #[arg(short, long)]
    pub target: Option<PathBuf>,

    /// Locale of the file given with --target
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Comma separated globs of locale messages files
    #[arg(short = 'T', long, alias = "targetPaths")]
    pub target_paths: Option<String>,

    /// Regex over file names of --target-paths; group 1 is the locale
    #[arg(short = 'm', long, alias = "filenameMatch")]
    pub filename_match: Option<String>,
}

impl LocalTargetOptions {
    pub fn read(&self) -> Result<sfc_locale_core::LocaleMessages> {
        Ok(sfc_locale_core::read_target_locale_messages(
            self.target.as_deref(),
            self.locale.as_deref(),
            self.target_paths.as_deref(),
            self.filename_match.as_deref(),
        )?)
    }
}

/// A namespace dictionary that cannot be read degrades to an empty one.
pub fn load_namespace_or_default(path: Option<&Path>) -> NamespaceDictionary {
    let Some(path) = path else {
        return NamespaceDictionary::new();
    };
    match load_namespace_dictionary(path) {
        Ok(dictionary) => {
            log::debug!("namespace dictionary: {dictionary:?}");
            dictionary
        }
        Err(err) => {
            log::warn!("cannot load namespace dictionary: {err}");
            NamespaceDictionary::new()
        }
    }
}

pub fn canonical_dir(path: &Path) -> Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Invalid target path {}", path.display()))?;
    if !dir.is_dir() {
        return Err(LocaleError::configuration(format!(
            "target {} is not a directory",
            path.display()
        ))
        .into());
    }
    Ok(dir)
}
