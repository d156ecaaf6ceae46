use crate::error::{LocaleError, Result};
use crate::squeezer::SfcSource;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Scanner for finding single-file components under a target directory
pub struct ComponentScanner {
    root: PathBuf,
    extension: String,
}

impl ComponentScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extension: "vue".to_string(),
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    /// Component paths in a stable (sorted, depth-first) order
    pub fn scan(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(LocaleError::configuration(format!(
                "target {} is not a directory",
                self.root.display()
            )));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !Self::is_ignored_scope(entry));

        for entry in walker {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }
                    if self.is_component(entry.path()) {
                        files.push(entry.into_path());
                    }
                }
                Err(e) => log::warn!("Failed to read entry: {e}"),
            }
        }

        log::debug!(
            "Found {} component(s) under {}",
            files.len(),
            self.root.display()
        );
        Ok(files)
    }

    /// Scan and read every component eagerly
    pub fn read(&self) -> Result<Vec<SfcSource>> {
        self.scan()?
            .into_iter()
            .map(|path| {
                let content =
                    std::fs::read_to_string(&path).map_err(|e| LocaleError::io(&path, e))?;
                Ok(SfcSource { path, content })
            })
            .collect()
    }

    fn is_component(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    fn is_ignored_scope(entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_SCOPES.iter().any(|ignored| ignored == &name))
    }
}

/// Read every `.vue` component under `target`.
pub fn read_sfc(target: impl AsRef<Path>) -> Result<Vec<SfcSource>> {
    ComponentScanner::new(target).read()
}

const IGNORED_SCOPES: &[&str] = &[".git", ".hg", ".svn", "node_modules", "dist", ".nuxt"];
