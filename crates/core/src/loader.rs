//! Reading and writing locale message files.

use crate::bundle::{glob_paths, ExternalLocaleMessages};
use crate::error::{LocaleError, Result};
use crate::format::Format;
use crate::squeezer::SfcSource;
use regex::RegexBuilder;
use serde_json::Value;
use sfc_locale_protocol::path_lists::split_path_list;
use sfc_locale_protocol::{LocaleMessages, NamespaceDictionary};
use std::fs;
use std::path::{Path, PathBuf};

/// Parse a file in the format named by its extension, JSON otherwise.
pub fn read_value(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|e| LocaleError::io(path, e))?;
    Format::from_path(path)
        .unwrap_or_default()
        .parse(&raw)
        .map_err(|message| {
            LocaleError::configuration(format!("cannot parse {}: {message}", path.display()))
        })
}

fn read_object(path: &Path) -> Result<LocaleMessages> {
    match read_value(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(LocaleError::configuration(format!(
            "{} must contain an object",
            path.display()
        ))),
    }
}

/// Bundle pattern -> namespace mapping.
pub fn load_namespace_dictionary(path: &Path) -> Result<NamespaceDictionary> {
    let raw = fs::read_to_string(path).map_err(|e| LocaleError::io(path, e))?;
    Ok(serde_json::from_str(&raw)?)
}

/// Read the tree to infuse. With `match_regex`, `path` is a directory of
/// `*.json` files whose name yields the locale (first group).
pub fn read_locale_messages(path: &Path, match_regex: Option<&str>) -> Result<LocaleMessages> {
    let Some(pattern) = match_regex.filter(|m| !m.is_empty()) else {
        return read_object(path);
    };

    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LocaleError::invalid_pattern(pattern, e))?;

    let mut messages = LocaleMessages::new();
    for file in glob_paths(&path.join("*.json").to_string_lossy())? {
        let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(locale) = regex
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
        else {
            log::debug!("{} does not match {pattern}, skipped", file.display());
            continue;
        };
        messages.insert(locale, read_value(&file)?);
    }
    Ok(messages)
}

/// Local messages for `push` and `diff`: a single `target` file (locale from
/// `locale` or the file stem), or `target_paths` globs matched with
/// `filename_match`.
pub fn read_target_locale_messages(
    target: Option<&Path>,
    locale: Option<&str>,
    target_paths: Option<&str>,
    filename_match: Option<&str>,
) -> Result<LocaleMessages> {
    let mut messages = LocaleMessages::new();

    if let Some(target) = target {
        let locale = match locale.filter(|l| !l.is_empty()) {
            Some(locale) => locale.to_string(),
            None => target
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string(),
        };
        messages.insert(locale, read_value(target)?);
        return Ok(messages);
    }

    let Some(target_paths) = target_paths else {
        return Err(LocaleError::configuration(
            "You need to specify either --target or --target-paths",
        ));
    };
    let Some(pattern) = filename_match.filter(|m| !m.is_empty()) else {
        return Err(LocaleError::configuration(
            "You need to specify together --filename-match",
        ));
    };
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| LocaleError::invalid_pattern(pattern, e))?;

    for pattern_path in split_path_list(target_paths) {
        for file in glob_paths(&pattern_path)? {
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default();
            match regex.captures(name).and_then(|caps| caps.get(1)) {
                Some(locale) if !locale.as_str().is_empty() => {
                    messages.insert(locale.as_str().to_string(), read_value(&file)?);
                }
                _ => log::info!("{} is not matched with {pattern}", file.display()),
            }
        }
    }
    Ok(messages)
}

/// Persist the squeezed tree. With `split`, `output` is a directory that
/// receives one `<locale>.<ext>` file per locale.
pub fn write_locale_messages(
    messages: &LocaleMessages,
    output: &Path,
    format: Format,
    split: bool,
) -> Result<Vec<PathBuf>> {
    if !split {
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LocaleError::io(parent, e))?;
        }
        let text = format.stringify(&Value::Object(messages.clone()))?;
        fs::write(output, text).map_err(|e| LocaleError::io(output, e))?;
        return Ok(vec![output.to_path_buf()]);
    }

    fs::create_dir_all(output).map_err(|e| LocaleError::io(output, e))?;
    let mut written = Vec::with_capacity(messages.len());
    for (locale, content) in messages {
        let path = output.join(format!("{locale}.{}", format.extension()));
        fs::write(&path, format.stringify(content)?).map_err(|e| LocaleError::io(&path, e))?;
        written.push(path);
    }
    Ok(written)
}

/// Bundles whose file does not already hold the same messages. A missing or
/// unparsable file counts as changed.
pub fn changed_external_locale_messages(
    external: &[ExternalLocaleMessages],
) -> Vec<&ExternalLocaleMessages> {
    external
        .iter()
        .filter(|bundle| {
            let current = fs::read_to_string(&bundle.path)
                .ok()
                .and_then(|raw| serde_json::from_str::<Value>(&raw).ok());
            current.as_ref() != Some(&bundle.messages)
        })
        .collect()
}

/// Rewrite the bundle files whose content changed; returns their paths.
pub fn write_external_locale_messages(external: &[ExternalLocaleMessages]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for bundle in changed_external_locale_messages(external) {
        let text = Format::Json.stringify(&bundle.messages)?;
        fs::write(&bundle.path, text).map_err(|e| LocaleError::io(&bundle.path, e))?;
        written.push(bundle.path.clone());
    }
    Ok(written)
}

pub fn write_sfc(sources: &[SfcSource]) -> Result<()> {
    for source in sources {
        fs::write(&source.path, &source.content).map_err(|e| LocaleError::io(&source.path, e))?;
    }
    Ok(())
}
