use crate::format::Format;
use serde::{Deserialize, Serialize};

/// Configuration for reading locale messages out of components
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SqueezeConfig {
    /// Custom block tag holding locale messages
    pub block_type: String,

    /// Language assumed for blocks without a `lang` attribute
    pub default_lang: String,

    /// Nest each component's messages under its directory hierarchy
    pub structure_prefix: bool,

    /// File extension of single-file components
    pub component_extension: String,
}

impl Default for SqueezeConfig {
    fn default() -> Self {
        Self {
            block_type: "i18n".to_string(),
            default_lang: "json".to_string(),
            structure_prefix: false,
            component_extension: "vue".to_string(),
        }
    }
}

impl SqueezeConfig {
    /// Config used by the squeeze/infuse round trip (hierarchy-prefixed keys)
    pub fn with_structure_prefix() -> Self {
        Self {
            structure_prefix: true,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.block_type.trim().is_empty() {
            return Err("block_type must not be empty".to_string());
        }

        if self.block_type.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
            return Err(format!(
                "block_type ({}) is not a valid tag name",
                self.block_type
            ));
        }

        if Format::from_lang(&self.default_lang).is_none() {
            return Err(format!(
                "default_lang ({}) must be one of json, json5, yaml, yml",
                self.default_lang
            ));
        }

        if self.component_extension.trim_start_matches('.').is_empty() {
            return Err("component_extension must not be empty".to_string());
        }

        Ok(())
    }
}
