use super::{LocalTargetOptions, ProviderOptions};
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;

const TARGET: &str = "sfc_locale::push";

#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub provider: ProviderOptions,

    #[command(flatten)]
    pub local: LocalTargetOptions,

    /// Message layout expected by the provider (e.g. `flat`)
    #[arg(short, long)]
    pub normalize: Option<String>,

    /// Run the push without applying it to the service
    #[arg(short, long, alias = "dryRun")]
    pub dry_run: bool,
}

pub async fn run(args: PushArgs) -> Result<()> {
    let provider = args.provider.create()?;
    let messages = args.local.read()?;
    log::debug!(
        target: TARGET,
        "pushing locales: {:?}",
        messages.keys().collect::<Vec<_>>()
    );

    provider
        .push(sfc_locale_protocol::PushArgs {
            messages,
            dry_run: args.dry_run,
            normalize: args.normalize,
        })
        .await
        .with_context(|| format!("push to {} failed", provider.name()))?;

    log::info!(target: TARGET, "push success");
    Ok(())
}
