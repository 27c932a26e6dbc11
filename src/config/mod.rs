//! Per-user configuration: endpoint URL, API key, model and language.

pub mod store;

pub use store::{mask_api_key, FileConfigStore, CONFIG_ENV_VAR, CONFIG_FILE_NAME};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::llm::{Credentials, DEFAULT_MODEL};
use crate::prompt::Locale;

/// Language reported when none is configured.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Persisted configuration record. Every field is optional on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GromitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl GromitConfig {
    /// Overwrite fields that are set in `updates`.
    pub fn apply(&mut self, updates: GromitConfig) {
        if updates.ai_url.is_some() {
            self.ai_url = updates.ai_url;
        }
        if updates.api_key.is_some() {
            self.api_key = updates.api_key;
        }
        if updates.model.is_some() {
            self.model = updates.model;
        }
        if updates.language.is_some() {
            self.language = updates.language;
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &GromitConfig::default()
    }

    pub fn locale(&self) -> Locale {
        Locale::resolve(self.language.as_deref())
    }
}

/// Configuration that passed validation and can drive a generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedConfig {
    pub credentials: Credentials,
    pub model: String,
    pub locale: Locale,
}

/// Load/save access to the configuration record.
///
/// Commands receive a store instead of reading a global file, so tests can
/// point them at a temporary location.
pub trait ConfigStore {
    /// Where the record lives (shown to users).
    fn path(&self) -> &Path;

    fn exists(&self) -> bool;

    /// Current record. A missing or unreadable file loads as empty.
    fn load(&self) -> GromitConfig;

    fn save(&self, config: &GromitConfig) -> Result<(), ConfigError>;

    /// Delete the record. Returns whether anything was removed.
    fn remove(&self) -> Result<bool, ConfigError>;

    /// Merge `updates` into the stored record and save it.
    fn update(&self, updates: GromitConfig) -> Result<GromitConfig, ConfigError> {
        let mut config = self.load();
        config.apply(updates);
        self.save(&config)?;
        Ok(config)
    }

    /// Check that the file exists and both `aiUrl` and `apiKey` are set,
    /// in that order.
    fn validate(&self) -> Result<ValidatedConfig, ConfigError> {
        if !self.exists() {
            return Err(ConfigError::NotFound {
                path: self.path().to_path_buf(),
            });
        }

        let config = self.load();
        let locale = config.locale();

        let endpoint = config
            .ai_url
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::MissingUrl)?;
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(ValidatedConfig {
            credentials: Credentials { endpoint, api_key },
            model: config.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            locale,
        })
    }
}
