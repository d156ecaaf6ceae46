use super::{canonical_dir, load_namespace_or_default};
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::tree::deep_merge_map;
use sfc_locale_core::{
    generate, get_external_locale_messages, resolve_bundle_entries, squeeze,
    validate_bundle_paths, write_locale_messages, ComponentScanner, Format, LocaleMessages,
    SqueezeConfig,
};
use sfc_locale_protocol::path_lists::split_optional_list;
use std::path::PathBuf;

const TARGET: &str = "sfc_locale::squeeze";

#[derive(Args, Debug)]
pub struct SqueezeArgs {
    /// Directory holding the single-file components
    #[arg(short, long)]
    pub target: PathBuf,

    /// Write one file per locale into --output (a directory)
    #[arg(short, long)]
    pub split: bool,

    /// Comma separated globs of external locale messages to bundle together
    #[arg(short, long, alias = "bundleWith")]
    pub bundle_with: Option<String>,

    /// Regex over external file paths: group 1 is the locale, group 2 the file key
    #[arg(short = 'm', long, alias = "bundleMatch")]
    pub bundle_match: Option<String>,

    /// JSON file mapping bundle globs to namespaces
    #[arg(short, long)]
    pub namespace: Option<PathBuf>,

    /// Path to output squeezed locale messages
    #[arg(short, long, default_value = "messages.json")]
    pub output: PathBuf,

    /// Format of blocks without a lang attribute, and of the output
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Nest each component's messages under its directory structure
    #[arg(short = 'p', long, alias = "structurePrefix")]
    pub structure_prefix: bool,
}

pub fn run(args: SqueezeArgs) -> Result<()> {
    let format = Format::parse_option(&args.format)?;
    let target = canonical_dir(&args.target)?;
    let config = SqueezeConfig {
        default_lang: format.as_str().to_string(),
        structure_prefix: args.structure_prefix,
        ..SqueezeConfig::default()
    };

    let bundle_with = split_optional_list(args.bundle_with.as_deref());
    validate_bundle_paths(&bundle_with, args.bundle_match.as_deref())?;
    let external = if bundle_with.is_empty() {
        LocaleMessages::new()
    } else {
        let dictionary = load_namespace_or_default(args.namespace.as_deref());
        match resolve_bundle_entries(&dictionary, &bundle_with, args.bundle_match.as_deref())
            .and_then(|entries| get_external_locale_messages(&entries))
        {
            Ok(messages) => messages,
            Err(err) => {
                log::warn!(target: TARGET, "cannot load external locale messages: {err}");
                LocaleMessages::new()
            }
        }
    };

    let sources = ComponentScanner::new(&target)
        .with_extension(config.component_extension.clone())
        .read()?;
    log::debug!(target: TARGET, "read {} component(s)", sources.len());

    let meta = squeeze(&target, &sources, &config)?;
    let mut messages = generate(&meta, config.structure_prefix);
    deep_merge_map(&mut messages, external);

    let written = write_locale_messages(&messages, &args.output, format, args.split)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    for path in &written {
        log::info!(target: TARGET, "wrote {}", path.display());
    }
    Ok(())
}
