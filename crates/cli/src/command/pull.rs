use super::ProviderOptions;
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::{write_locale_messages, Format};
use sfc_locale_protocol::path_lists::split_path_list;
use std::path::PathBuf;

const TARGET: &str = "sfc_locale::pull";

#[derive(Args, Debug)]
pub struct PullArgs {
    #[command(flatten)]
    pub provider: ProviderOptions,

    /// Directory receiving one `<locale>.<format>` file per locale
    #[arg(short, long)]
    pub output: PathBuf,

    /// Comma separated locales to pull (all when omitted)
    #[arg(short, long, default_value = "")]
    pub locales: String,

    /// Message layout to request from the provider (e.g. `flat`)
    #[arg(short, long)]
    pub normalize: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Pull without writing anything
    #[arg(short, long, alias = "dryRun")]
    pub dry_run: bool,
}

pub async fn run(args: PullArgs) -> Result<()> {
    let format = Format::parse_option(&args.format)?;
    let provider = args.provider.create()?;

    let messages = provider
        .pull(sfc_locale_protocol::PullArgs {
            locales: split_path_list(&args.locales),
            dry_run: args.dry_run,
            normalize: args.normalize.clone(),
            format: format.as_str().to_string(),
        })
        .await
        .with_context(|| format!("pull from {} failed", provider.name()))?;

    for locale in messages.keys() {
        let path = args.output.join(format!("{locale}.{}", format.extension()));
        log::info!(target: TARGET, "write '{locale}' messages to {}", path.display());
    }
    if !args.dry_run {
        write_locale_messages(&messages, &args.output, format, true)?;
    }
    log::info!(target: TARGET, "pull success");
    Ok(())
}
