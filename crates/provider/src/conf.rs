use sfc_locale_core::{LocaleError, Result};
use sfc_locale_protocol::ProviderConf;
use std::path::{Path, PathBuf};

/// Explicit `conf` path, or `<provider>-conf.json` in `cwd`. Only the last
/// component of a scoped provider name (`@scope/name`) is used.
pub fn resolve_provider_conf(provider: &str, conf: Option<&Path>, cwd: &Path) -> PathBuf {
    match conf {
        Some(conf) if conf.is_absolute() => conf.to_path_buf(),
        Some(conf) => cwd.join(conf),
        None => {
            let base = Path::new(provider)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(provider);
            cwd.join(format!("{base}-conf.json"))
        }
    }
}

/// A missing file yields the default (empty) configuration.
pub fn load_provider_conf(path: &Path) -> Result<ProviderConf> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no provider conf at {}, using defaults", path.display());
            return Ok(ProviderConf::default());
        }
        Err(e) => return Err(LocaleError::io(path, e)),
    };
    serde_json::from_str(&raw).map_err(|e| {
        LocaleError::configuration(format!("invalid provider conf {}: {e}", path.display()))
    })
}
