/// Split a comma-delimited option value (`a/*.json,b/*.json`) into its parts.
pub fn split_path_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Same as [`split_path_list`], for options that are absent more often than not.
pub fn split_optional_list(raw: Option<&str>) -> Vec<String> {
    raw.map(split_path_list).unwrap_or_default()
}
