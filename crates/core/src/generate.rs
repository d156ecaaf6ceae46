use crate::squeezer::Meta;
use crate::tree::{deep_merge, ensure_object_path};
use serde_json::{Map, Value};
use sfc_locale_protocol::LocaleMessages;

/// Fold every component's blocks into one tree per locale.
///
/// With `structure_prefix` each component's content is nested under its
/// hierarchy (`{en: {a: {Widget: {...}}}}`); without it, it is merged at the
/// locale root. Colliding keys resolve to the component processed last.
pub fn generate(meta: &Meta, structure_prefix: bool) -> LocaleMessages {
    let mut messages = LocaleMessages::new();

    for component in &meta.components {
        let Some(first) = component.blocks.first() else {
            continue;
        };
        if first.messages.is_none() {
            log::debug!(
                "generate: skipping {}, first block has no messages",
                component.content_path.display()
            );
            continue;
        }

        log::debug!("generate component = {}", component.content_path.display());
        for block in &component.blocks {
            let Some(block_messages) = &block.messages else {
                continue;
            };
            for (locale, content) in block_messages {
                let root = messages
                    .entry(locale.clone())
                    .or_insert_with(|| Value::Object(Map::new()));
                if !root.is_object() {
                    *root = Value::Object(Map::new());
                }

                match (structure_prefix, root, component.hierarchy.split_last()) {
                    (true, Value::Object(locale_root), Some((leaf, parents))) => {
                        let parent = ensure_object_path(locale_root, parents);
                        let slot = parent
                            .entry(leaf.clone())
                            .or_insert_with(|| Value::Object(Map::new()));
                        deep_merge(slot, content.clone());
                    }
                    (_, root, _) => deep_merge(root, content.clone()),
                }
            }
        }
    }

    messages
}
