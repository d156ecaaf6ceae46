use super::ProviderOptions;
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::LocaleError;
use sfc_locale_protocol::path_lists::split_path_list;
use sfc_locale_protocol::{serialize_json_pretty, TranslationStatus};

const TARGET: &str = "sfc_locale::status";

#[derive(Args, Debug)]
pub struct StatusArgs {
    #[command(flatten)]
    pub provider: ProviderOptions,

    /// Comma separated locales to report (all when omitted)
    #[arg(short, long, default_value = "")]
    pub locales: String,

    /// Output JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: StatusArgs) -> Result<()> {
    let provider = args.provider.create()?;
    let statuses = provider
        .status(sfc_locale_protocol::StatusArgs {
            locales: split_path_list(&args.locales),
        })
        .await
        .with_context(|| format!("status from {} failed", provider.name()))?;
    log::debug!(target: TARGET, "raw status: {statuses:?}");

    if args.json {
        println!("{}", serialize_json_pretty(&statuses)?);
    } else {
        print!("{}", render_table(&statuses));
    }

    if statuses.iter().any(|status| !status.is_complete()) {
        return Err(LocaleError::TranslationStatus("Translation work in progress".to_string()).into());
    }
    log::info!(target: TARGET, "Translation done");
    Ok(())
}

fn render_table(statuses: &[TranslationStatus]) -> String {
    let width = statuses
        .iter()
        .map(|status| status.locale.len())
        .max()
        .unwrap_or(0)
        .max("locale".len());
    let mut out = format!("{:<width$}  {:>10}\n", "locale", "percentage");
    for status in statuses {
        out.push_str(&format!(
            "{:<width$}  {:>10.2}\n",
            status.locale, status.percentage
        ));
    }
    out
}
