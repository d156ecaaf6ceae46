//! # SFC Locale Core
//!
//! Moves locale messages between single-file components and one consolidated
//! message tree, in both directions.
//!
//! ## Architecture
//!
//! ```text
//! *.vue sources
//!     │
//!     ├──> squeeze: parse <i18n> blocks per component
//!     │    └─> Meta (components, blocks, byte spans)
//!     │
//!     ├──> generate: fold blocks into { locale: { ...hierarchy: messages } }
//!     │    └─> deep-merge external bundle files on top
//!     │
//!     └──> infuse: split bundles back out of the tree
//!          ├─> diff tree against each block, patch in place
//!          ├─> append blocks for new locales, warn on orphans
//!          └─> re-render dirty blocks only (untouched bytes preserved)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use sfc_locale_core::{apply, generate, infuse, squeeze, SfcSource, SqueezeConfig};
//! use std::path::{Path, PathBuf};
//!
//! let sources = vec![SfcSource {
//!     path: PathBuf::from("/app/src/pages/Home.vue"),
//!     content: "<i18n locale=\"en\">{\"title\": \"Home\"}</i18n>\n".to_string(),
//! }];
//! let config = SqueezeConfig::with_structure_prefix();
//! let mut meta = squeeze(Path::new("/app/src"), &sources, &config).unwrap();
//!
//! let tree = generate(&meta, config.structure_prefix);
//! assert_eq!(tree["en"]["pages"]["Home"]["title"], "Home");
//!
//! let report = apply(&tree, &mut meta);
//! assert!(report.is_noop());
//! assert!(infuse(&meta).unwrap().is_empty());
//! ```

mod bundle;
mod config;
mod descriptor;
mod diff;
mod error;
mod format;
mod generate;
mod infuser;
mod loader;
mod path;
mod scanner;
mod squeezer;
pub mod tree;

pub use bundle::{
    get_external_locale_messages, glob_paths, resolve_bundle_entries, split_locale_messages,
    validate_bundle_paths, BundleMatcher, ExternalBundleEntry, ExternalLocaleMessages,
    SplitLocaleMessages,
};
pub use config::SqueezeConfig;
pub use descriptor::{parse_blocks, RawBlock, UnclosedElement};
pub use diff::{apply_change, apply_diff, diff, Change, ChangeKind, PathSegment};
pub use error::{LocaleError, Result};
pub use format::Format;
pub use generate::generate;
pub use infuser::{apply, get_target_locale_messages, infuse, render_component, InfuseReport};
pub use loader::{
    changed_external_locale_messages, load_namespace_dictionary, read_locale_messages,
    read_target_locale_messages, read_value, write_external_locale_messages,
    write_locale_messages, write_sfc,
};
pub use path::{parse_path, ComponentPathInfo};
pub use scanner::{read_sfc, ComponentScanner};
pub use squeezer::{squeeze, ComponentMeta, LocaleMessageBlock, Meta, SfcSource};

pub use sfc_locale_protocol::{LocaleMessages, NamespaceDictionary};
