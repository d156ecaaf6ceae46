use super::{canonical_dir, load_namespace_or_default};
use anyhow::{Context as AnyhowContext, Result};
use clap::Args;
use sfc_locale_core::{
    apply, changed_external_locale_messages, infuse, read_locale_messages,
    resolve_bundle_entries, split_locale_messages, squeeze, validate_bundle_paths,
    write_external_locale_messages, write_sfc, ComponentScanner, SqueezeConfig,
};
use sfc_locale_protocol::path_lists::split_optional_list;
use std::path::PathBuf;

const TARGET: &str = "sfc_locale::infuse";

#[derive(Args, Debug)]
pub struct InfuseArgs {
    /// Directory holding the single-file components
    #[arg(short, long)]
    pub target: PathBuf,

    /// Locale messages to infuse (a file, or a directory with --match)
    #[arg(short, long)]
    pub locales: PathBuf,

    /// Regex over file names in --locales; group 1 is the locale
    #[arg(short, long = "match")]
    pub match_regex: Option<String>,

    /// Comma separated globs of external locale messages bundled by squeeze
    #[arg(short, long, alias = "unbundleTo")]
    pub unbundle_to: Option<String>,

    /// Regex over external file paths: group 1 is the locale, group 2 the file key
    #[arg(short = 'M', long, alias = "unbundleMatch")]
    pub unbundle_match: Option<String>,

    /// JSON file mapping bundle globs to namespaces
    #[arg(short, long)]
    pub namespace: Option<PathBuf>,

    /// Report what would change without writing anything
    #[arg(short, long, alias = "dryRun")]
    pub dry_run: bool,
}

pub fn run(args: InfuseArgs) -> Result<()> {
    let target = canonical_dir(&args.target)?;
    let dictionary = load_namespace_or_default(args.namespace.as_deref());

    let messages = read_locale_messages(&args.locales, args.match_regex.as_deref())
        .with_context(|| format!("Failed to read {}", args.locales.display()))?;

    let unbundle_to = split_optional_list(args.unbundle_to.as_deref());
    validate_bundle_paths(&unbundle_to, args.unbundle_match.as_deref())?;
    let entries = resolve_bundle_entries(&dictionary, &unbundle_to, args.unbundle_match.as_deref())?;
    let split = split_locale_messages(&messages, &entries);
    log::debug!(
        target: TARGET,
        "{} external file(s) carved out of the tree",
        split.external.len()
    );

    let config = SqueezeConfig::default();
    let sources = ComponentScanner::new(&target)
        .with_extension(config.component_extension.clone())
        .read()?;
    let mut meta = squeeze(&target, &sources, &config)?;

    let report = apply(&split.sfc, &mut meta);
    let changed = infuse(&meta)?;
    log::info!(
        target: TARGET,
        "{} block(s) changed, {} appended, {} orphaned",
        report.changed_blocks,
        report.appended.len(),
        report.orphaned.len()
    );

    if args.dry_run {
        for source in &changed {
            log::info!(target: TARGET, "dry run: would update {}", source.path.display());
        }
        for external in changed_external_locale_messages(&split.external) {
            log::info!(target: TARGET, "dry run: would update {}", external.path.display());
        }
        return Ok(());
    }

    write_sfc(&changed)?;
    let bundles = write_external_locale_messages(&split.external)?;
    for path in changed.iter().map(|source| &source.path).chain(&bundles) {
        log::info!(target: TARGET, "updated {}", path.display());
    }
    Ok(())
}
