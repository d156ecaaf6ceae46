use super::{LocalTargetOptions, ProviderOptions};
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use serde_json::Value;
use sfc_locale_core::{diff, Format, LocaleError};

const TARGET: &str = "sfc_locale::diff";

#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub provider: ProviderOptions,

    #[command(flatten)]
    pub local: LocalTargetOptions,

    /// Message layout expected by the provider (e.g. `flat`)
    #[arg(short, long)]
    pub normalize: Option<String>,
}

/// Prints service -> local changes; any difference is reported as an error.
pub async fn run(args: DiffArgs) -> Result<()> {
    let provider = args.provider.create()?;
    let local = args.local.read()?;

    let service = provider
        .pull(sfc_locale_protocol::PullArgs {
            locales: local.keys().cloned().collect(),
            dry_run: false,
            normalize: args.normalize,
            format: Format::Json.as_str().to_string(),
        })
        .await
        .with_context(|| format!("pull from {} failed", provider.name()))?;

    let changes = diff(&Value::Object(service), &Value::Object(local));
    log::debug!(target: TARGET, "{} change(s)", changes.len());
    if changes.is_empty() {
        log::info!(target: TARGET, "No differences");
        return Ok(());
    }

    for change in &changes {
        println!("{change}");
    }
    Err(LocaleError::Diff("There are differences!".to_string()).into())
}
