use std::path::PathBuf;
use thiserror::Error;

/// Result type for locale message operations
pub type Result<T> = std::result::Result<T, LocaleError>;

/// Errors that can occur while squeezing, infusing or syncing locale messages
#[derive(Error, Debug)]
pub enum LocaleError {
    /// Missing or conflicting options
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No provider registered under the requested name
    #[error("Not found {0} provider")]
    ProviderNotFound(String),

    /// Component path is not located under the target base path
    #[error("Cannot resolve {} against base path {}", target.display(), base.display())]
    PathResolution { base: PathBuf, target: PathBuf },

    /// A locale messages block could not be parsed in its declared language
    #[error("Failed to parse locale messages block #{index} ({lang}) in {}: {message}", path.display())]
    MessageParse {
        path: PathBuf,
        index: usize,
        lang: String,
        message: String,
    },

    /// Component whose top-level elements cannot be delimited
    #[error("Malformed component {}: {message}", path.display())]
    MalformedComponent { path: PathBuf, message: String },

    /// Local messages differ from the provider's
    #[error("{0}")]
    Diff(String),

    /// Some locales are not fully translated yet
    #[error("{0}")]
    TranslationStatus(String),

    /// Invalid glob or regex supplied by the user
    #[error("Invalid pattern {pattern}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Unknown serialization format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Provider failed while talking to its backend
    #[error("Provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    /// IO error with the offending path
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl LocaleError {
    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create an IO error bound to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid pattern error
    pub fn invalid_pattern(pattern: impl Into<String>, msg: impl ToString) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            message: msg.to_string(),
        }
    }

    /// Create a provider failure
    pub fn provider(provider: impl Into<String>, msg: impl ToString) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: msg.to_string(),
        }
    }
}
