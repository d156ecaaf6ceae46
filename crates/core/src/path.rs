use crate::error::{LocaleError, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Where a component lives relative to the squeeze target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentPathInfo {
    pub content_path: PathBuf,
    pub component: String,
    /// Directory segments from the base path down, then the component name.
    pub hierarchy: Vec<String>,
}

/// Resolve `target_path` against `base_path`.
///
/// `base/a/b/Widget.vue` gives the hierarchy `["a", "b", "Widget"]`; a file
/// directly inside `base` gives `["Widget"]`.
pub fn parse_path(base_path: &Path, target_path: &Path) -> Result<ComponentPathInfo> {
    let resolution_error = || LocaleError::PathResolution {
        base: base_path.to_path_buf(),
        target: target_path.to_path_buf(),
    };

    let component = target_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(resolution_error)?
        .to_string();

    let dir = target_path.parent().unwrap_or_else(|| Path::new(""));
    let remainder = dir
        .strip_prefix(base_path)
        .map_err(|_| resolution_error())?;

    let mut hierarchy = Vec::new();
    for segment in remainder.components() {
        match segment {
            Component::Normal(name) => hierarchy.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => return Err(resolution_error()),
        }
    }
    hierarchy.push(component.clone());

    log::debug!(
        "parse_path: content_path = {}, component = {component}, hierarchy = {hierarchy:?}",
        target_path.display()
    );

    Ok(ComponentPathInfo {
        content_path: target_path.to_path_buf(),
        component,
        hierarchy,
    })
}
