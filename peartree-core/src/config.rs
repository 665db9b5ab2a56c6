use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::business::BusinessFacts;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parsing(#[from] toml::de::Error),
    #[error("no [business] table was configured")]
    MissingBusiness,
}

/// Contents of `peartree.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub business: Option<BusinessFacts>,
}

impl Config {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&data)?;

        Ok(config)
    }

    pub fn business(&self) -> Result<&BusinessFacts, ConfigError> {
        self.business.as_ref().ok_or(ConfigError::MissingBusiness)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub base_url: String,
    pub site_name: String,
    /// Open Graph locale, `en_GB` style.
    pub locale: String,
    pub description_max_len: usize,
    pub truncation_marker: String,
    pub default_og_image: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://peartree.dental/".into(),
            site_name: "Peartree Dental".into(),
            locale: "en_GB".into(),
            description_max_len: 160,
            truncation_marker: "…".into(),
            default_og_image: None,
        }
    }
}

impl SiteConfig {
    /// The configured base URL, always ending in exactly one `/`.
    pub fn base_url(&self) -> String {
        format!("{}/", self.base_url.trim().trim_end_matches('/'))
    }

    /// `lang` attribute value derived from the locale.
    pub fn language(&self) -> String {
        self.locale.replace('_', "-")
    }
}
