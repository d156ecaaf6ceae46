//! Localization service providers.
//!
//! A provider mirrors the local message tree to some translation service.
//! Providers are looked up by name in a [`ProviderRegistry`]; the `local`
//! provider keeps a service-side copy on disk and ships with the crate.

use async_trait::async_trait;
use sfc_locale_core::Result;
use sfc_locale_protocol::{
    ExportArgs, LocaleMessages, PullArgs, PushArgs, RawLocaleMessage, StatusArgs,
    TranslationStatus,
};

mod conf;
mod local;
mod normalize;
mod registry;

pub use conf::{load_provider_conf, resolve_provider_conf};
pub use local::LocalProvider;
pub use normalize::{flatten, leaf_paths, unflatten, Normalize};
pub use registry::{ProviderFactory, ProviderRegistry};

#[async_trait]
pub trait LocalizationProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Locale messages held by the service, keyed by locale.
    async fn pull(&self, args: PullArgs) -> Result<LocaleMessages>;

    async fn push(&self, args: PushArgs) -> Result<()>;

    /// Locale messages serialized in `args.format`, one entry per locale.
    async fn export(&self, args: ExportArgs) -> Result<Vec<RawLocaleMessage>>;

    async fn status(&self, args: StatusArgs) -> Result<Vec<TranslationStatus>>;
}
