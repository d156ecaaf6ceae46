//! Write a (possibly edited) message tree back into the components.

use crate::diff::apply_diff;
use crate::error::Result;
use crate::format::Format;
use crate::squeezer::{ComponentMeta, LocaleMessageBlock, Meta, SfcSource};
use crate::tree::get_path;
use serde_json::{Map, Value};
use sfc_locale_protocol::LocaleMessages;
use std::collections::HashSet;
use std::path::PathBuf;

/// Outcome of [`apply`], for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfuseReport {
    pub changed_blocks: usize,
    pub appended: Vec<(PathBuf, String)>,
    pub orphaned: Vec<(PathBuf, String)>,
}

impl InfuseReport {
    pub fn is_noop(&self) -> bool {
        self.changed_blocks == 0 && self.appended.is_empty()
    }
}

/// Per locale, the content stored at `hierarchy`. Locales without that path
/// are left out.
pub fn get_target_locale_messages(tree: &LocaleMessages, hierarchy: &[String]) -> LocaleMessages {
    tree.iter()
        .filter_map(|(locale, root)| {
            get_path(root, hierarchy).map(|content| (locale.clone(), content.clone()))
        })
        .collect()
}

/// Diff `tree` into the blocks of every component in `meta`.
///
/// Existing blocks are patched in place and marked dirty when something
/// changed. Locales with no block get a new JSON block appended; blocks
/// whose locale is missing from the tree are kept as they are.
pub fn apply(tree: &LocaleMessages, meta: &mut Meta) -> InfuseReport {
    let mut report = InfuseReport::default();

    for component in &mut meta.components {
        let mut sources = get_target_locale_messages(tree, &component.hierarchy);
        let mut handled = HashSet::new();

        for block in &mut component.blocks {
            for locale in block.locales() {
                let Some(incoming) = sources.shift_remove(&locale) else {
                    if !handled.contains(&locale) {
                        log::warn!(
                            "infuse: {} has a '{}' block with no messages in the tree, left as is",
                            component.content_path.display(),
                            locale
                        );
                        report
                            .orphaned
                            .push((component.content_path.clone(), locale.clone()));
                    }
                    continue;
                };
                if patch_block(block, &locale, incoming) {
                    block.dirty = true;
                }
                handled.insert(locale);
            }
            if block.dirty {
                report.changed_blocks += 1;
            }
        }

        for (locale, content) in sources {
            log::debug!(
                "infuse: appending '{}' block to {}",
                locale,
                component.content_path.display()
            );
            let mut messages = Map::new();
            messages.insert(locale.clone(), content);
            component.blocks.push(LocaleMessageBlock {
                lang: Format::Json.as_str().to_string(),
                locale: Some(locale.clone()),
                messages: Some(messages),
                span: None,
                self_closing: false,
                dirty: true,
            });
            report
                .appended
                .push((component.content_path.clone(), locale));
        }
    }

    report
}

fn patch_block(block: &mut LocaleMessageBlock, locale: &str, incoming: Value) -> bool {
    let messages = block.messages.get_or_insert_with(Map::new);
    match messages.get_mut(locale) {
        Some(current) => !apply_diff(current, &incoming).is_empty(),
        None => {
            messages.insert(locale.to_string(), incoming);
            true
        }
    }
}

/// Render the components that changed. Untouched text is copied verbatim.
pub fn infuse(meta: &Meta) -> Result<Vec<SfcSource>> {
    let mut changed = Vec::new();
    for component in &meta.components {
        if let Some(content) = render_component(component, &meta.block_type, &meta.default_lang)? {
            changed.push(SfcSource {
                path: component.content_path.clone(),
                content,
            });
        }
    }
    log::debug!("infuse: {} component(s) to write", changed.len());
    Ok(changed)
}

/// New source for `component`, or `None` when no block is dirty.
pub fn render_component(
    component: &ComponentMeta,
    block_type: &str,
    default_lang: &str,
) -> Result<Option<String>> {
    if !component.blocks.iter().any(|block| block.dirty) {
        return Ok(None);
    }

    let source = component.source.as_str();
    let mut out = String::with_capacity(source.len());
    let mut cursor = 0;

    let mut in_place: Vec<_> = component
        .blocks
        .iter()
        .filter(|block| block.dirty)
        .filter_map(|block| block.span.clone().map(|span| (span, block)))
        .collect();
    in_place.sort_by_key(|(span, _)| span.start);

    for (span, block) in in_place {
        out.push_str(&source[cursor..span.start]);
        let content = block.format().stringify(&block.content_value())?;
        if block.self_closing {
            // `<i18n ... />` becomes `<i18n ...>` + content + `</i18n>`
            let open = source[span.clone()]
                .trim_end_matches('>')
                .trim_end()
                .trim_end_matches('/')
                .trim_end();
            out.push_str(&format!("{open}>\n{content}</{block_type}>"));
        } else {
            out.push('\n');
            out.push_str(&content);
        }
        cursor = span.end;
    }
    out.push_str(&source[cursor..]);

    for block in component.blocks.iter().filter(|b| b.dirty && b.span.is_none()) {
        let mut open = format!("<{block_type}");
        if let Some(locale) = &block.locale {
            open.push_str(&format!(" locale=\"{locale}\""));
        }
        if block.format() != Format::from_lang_or_default(default_lang) {
            open.push_str(&format!(" lang=\"{}\"", block.lang));
        }
        out.push_str(&format!(
            "\n{open}>\n{}</{block_type}>\n",
            block.format().stringify(&block.content_value())?
        ));
    }

    Ok(Some(out))
}
