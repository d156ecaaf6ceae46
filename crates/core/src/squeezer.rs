use crate::config::SqueezeConfig;
use crate::descriptor::{parse_blocks, RawBlock};
use crate::error::{LocaleError, Result};
use crate::format::Format;
use crate::path::parse_path;
use serde_json::{Map, Value};
use sfc_locale_protocol::LocaleMessages;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// A component file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcSource {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleMessageBlock {
    pub lang: String,
    /// Set when the block is bound to a single locale (`<i18n locale="en">`).
    pub locale: Option<String>,
    /// Locale keyed content; `None` for a blank block.
    pub messages: Option<LocaleMessages>,
    /// Inner content range in the component source, or the whole tag of a
    /// self-closing block. Appended blocks have none.
    pub span: Option<Range<usize>>,
    pub self_closing: bool,
    pub dirty: bool,
}

impl LocaleMessageBlock {
    pub fn locales(&self) -> Vec<String> {
        match (&self.locale, &self.messages) {
            (Some(locale), _) => vec![locale.clone()],
            (None, Some(messages)) => messages.keys().cloned().collect(),
            (None, None) => Vec::new(),
        }
    }

    pub fn format(&self) -> Format {
        Format::from_lang_or_default(&self.lang)
    }

    /// The value written back between the block tags.
    pub fn content_value(&self) -> Value {
        let messages = self.messages.clone().unwrap_or_default();
        match &self.locale {
            Some(locale) => messages
                .get(locale)
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new())),
            None => Value::Object(messages),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMeta {
    pub content_path: PathBuf,
    pub component: String,
    pub hierarchy: Vec<String>,
    pub source: String,
    pub blocks: Vec<LocaleMessageBlock>,
}

/// Everything squeezed out of one target directory.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub target: PathBuf,
    pub block_type: String,
    pub default_lang: String,
    pub components: Vec<ComponentMeta>,
}

/// Parse the locale message blocks of every component under `base_path`.
///
/// Fails on the first block that cannot be parsed; nothing is returned
/// for the other components in that case.
pub fn squeeze(base_path: &Path, sources: &[SfcSource], config: &SqueezeConfig) -> Result<Meta> {
    config.validate().map_err(LocaleError::Configuration)?;

    let mut components = Vec::with_capacity(sources.len());
    for source in sources {
        let info = parse_path(base_path, &source.path)?;
        let blocks = parse_blocks(&source.content)
            .map_err(|e| LocaleError::MalformedComponent {
                path: source.path.clone(),
                message: e.to_string(),
            })?
            .into_iter()
            .filter(|block| block.tag == config.block_type)
            .enumerate()
            .map(|(index, raw)| parse_block(source, index, &raw, config))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "squeeze: {} has {} locale block(s)",
            source.path.display(),
            blocks.len()
        );

        components.push(ComponentMeta {
            content_path: info.content_path,
            component: info.component,
            hierarchy: info.hierarchy,
            source: source.content.clone(),
            blocks,
        });
    }

    Ok(Meta {
        target: base_path.to_path_buf(),
        block_type: config.block_type.clone(),
        default_lang: config.default_lang.clone(),
        components,
    })
}

fn parse_block(
    source: &SfcSource,
    index: usize,
    raw: &RawBlock,
    config: &SqueezeConfig,
) -> Result<LocaleMessageBlock> {
    let lang = raw
        .attr("lang")
        .filter(|lang| !lang.is_empty())
        .unwrap_or(config.default_lang.as_str())
        .to_string();
    let locale = raw
        .attr("locale")
        .filter(|locale| !locale.is_empty())
        .map(str::to_string);
    let content = raw.content(&source.content);

    let parse_error = |message: String| LocaleError::MessageParse {
        path: source.path.clone(),
        index,
        lang: lang.clone(),
        message,
    };

    let messages = if content.trim().is_empty() {
        None
    } else {
        let value = Format::from_lang_or_default(&lang)
            .parse(content)
            .map_err(parse_error)?;
        match (&locale, value) {
            (Some(locale), value) => {
                let mut messages = Map::new();
                messages.insert(locale.clone(), value);
                Some(messages)
            }
            (None, Value::Object(messages)) => Some(messages),
            (None, other) => {
                return Err(parse_error(format!(
                    "expected an object keyed by locale, found {}",
                    value_kind(&other)
                )))
            }
        }
    };

    Ok(LocaleMessageBlock {
        lang,
        locale,
        messages,
        span: Some(if raw.self_closing {
            raw.element.clone()
        } else {
            raw.content.clone()
        }),
        self_closing: raw.self_closing,
        dirty: false,
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
