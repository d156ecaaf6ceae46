use super::ProviderOptions;
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::{Format, LocaleError};
use sfc_locale_protocol::path_lists::split_path_list;
use std::fs;
use std::path::PathBuf;

const TARGET: &str = "sfc_locale::export";

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub provider: ProviderOptions,

    /// Directory receiving the exported files
    #[arg(short, long)]
    pub output: PathBuf,

    /// Comma separated locales to export (all when omitted)
    #[arg(short, long, default_value = "")]
    pub locales: String,

    /// Format requested from the provider
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Export without writing anything
    #[arg(short, long, alias = "dryRun")]
    pub dry_run: bool,
}

pub async fn run(args: ExportArgs) -> Result<()> {
    let format = Format::parse_option(&args.format)?;
    let provider = args.provider.create()?;

    let exported = provider
        .export(sfc_locale_protocol::ExportArgs {
            locales: split_path_list(&args.locales),
            dry_run: args.dry_run,
            format: format.as_str().to_string(),
        })
        .await
        .with_context(|| format!("export from {} failed", provider.name()))?;

    if !args.dry_run {
        fs::create_dir_all(&args.output).map_err(|e| LocaleError::io(&args.output, e))?;
    }
    for message in &exported {
        let path = args
            .output
            .join(format!("{}.{}", message.locale, message.format));
        log::info!(
            target: TARGET,
            "write '{}' messages to {}",
            message.locale,
            path.display()
        );
        if !args.dry_run {
            fs::write(&path, &message.data).map_err(|e| LocaleError::io(&path, e))?;
        }
    }
    log::info!(target: TARGET, "export success");
    Ok(())
}
