use crate::local::LocalProvider;
use crate::LocalizationProvider;
use sfc_locale_core::{LocaleError, Result};
use sfc_locale_protocol::ProviderConf;
use std::collections::BTreeMap;

/// Builds a provider from its configuration.
pub type ProviderFactory = fn(ProviderConf) -> Result<Box<dyn LocalizationProvider>>;

/// Name -> factory lookup used by the commands that talk to a service.
#[derive(Default)]
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the providers shipped in this crate.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(LocalProvider::NAME, |conf| {
            Ok(Box::new(LocalProvider::from_conf(&conf)?))
        });
        registry
    }

    /// Later registrations replace earlier ones with the same name.
    pub fn register(&mut self, name: impl Into<String>, factory: ProviderFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_some() {
            log::debug!("provider {name} re-registered");
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn create(&self, name: &str, conf: ProviderConf) -> Result<Box<dyn LocalizationProvider>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| LocaleError::ProviderNotFound(name.to_string()))?;
        log::debug!("creating provider {name}");
        factory(conf)
    }
}
