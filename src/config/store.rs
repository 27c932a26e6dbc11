//! JSON file-backed `ConfigStore`.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ConfigError;

use super::{ConfigStore, GromitConfig};

/// File name under the home directory.
pub const CONFIG_FILE_NAME: &str = ".gromit.config";

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "GROMIT_CONFIG";

/// Configuration stored as pretty JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$GROMIT_CONFIG` when set, otherwise `~/.gromit.config`.
    pub fn default_location() -> Result<Self, ConfigError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Ok(Self::new(path));
            }
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(CONFIG_FILE_NAME)))
    }

    fn write_failed(&self, source: std::io::Error) -> ConfigError {
        ConfigError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn path(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> GromitConfig {
        if !self.exists() {
            return GromitConfig::default();
        }

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config {}: {}", self.path.display(), e);
                return GromitConfig::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config {}: {}", self.path.display(), e);
                GromitConfig::default()
            }
        }
    }

    /// Write atomically: temp file in the same directory, then rename.
    fn save(&self, config: &GromitConfig) -> Result<(), ConfigError> {
        let data = serde_json::to_string_pretty(config).map_err(ConfigError::Serialize)?;

        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| self.write_failed(e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&parent).map_err(|e| self.write_failed(e))?;
        tmp.write_all(data.as_bytes())
            .map_err(|e| self.write_failed(e))?;
        tmp.flush().map_err(|e| self.write_failed(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.write_failed(e.error))?;

        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    fn remove(&self) -> Result<bool, ConfigError> {
        if !self.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).map_err(|source| ConfigError::RemoveFailed {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }
}

/// Mask an API key for display: first 4 and last 4 characters when longer
/// than 8, otherwise all asterisks.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
    } else {
        "*".repeat(chars.len())
    }
}
