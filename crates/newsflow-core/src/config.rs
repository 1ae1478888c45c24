//! Configuration management.
//!
//! Credentials arrive from a TOML file supplied externally. The shipped
//! defaults are deliberate placeholders: a config whose values were never
//! replaced is treated as *unconfigured*, and the store adapter then
//! renders an empty, never-connecting feed instead of failing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ConfigError;

/// Placeholder the user must replace before the store will connect.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY";
pub const PLACEHOLDER_PROJECT_ID: &str = "your-project-id";
pub const PLACEHOLDER_DATABASE_URL: &str = "https://your-project-id.firebaseio.com";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub images: ImageHostConfig,
}

/// Realtime store credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub api_key: String,
    pub project_id: String,
    pub database_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
            project_id: PLACEHOLDER_PROJECT_ID.to_string(),
            database_url: PLACEHOLDER_DATABASE_URL.to_string(),
        }
    }
}

impl StoreConfig {
    /// False when any credential is empty or still a placeholder.
    /// An unconfigured store must never attempt a connection.
    pub fn is_configured(&self) -> bool {
        let blank_or_placeholder = self.api_key.is_empty()
            || self.api_key == PLACEHOLDER_API_KEY
            || self.project_id.is_empty()
            || self.project_id == PLACEHOLDER_PROJECT_ID
            || self.database_url.is_empty()
            || self.database_url == PLACEHOLDER_DATABASE_URL;
        !blank_or_placeholder
    }
}

/// Image hosting credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageHostConfig {
    pub api_key: String,
}

impl Default for ImageHostConfig {
    fn default() -> Self {
        Self {
            api_key: PLACEHOLDER_API_KEY.to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Load a config file from disk.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound(path.to_path_buf())
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::from_toml(&contents)
    }

    /// Load a config file, falling back to placeholder defaults when the
    /// file does not exist. Parse errors still surface: a present but
    /// broken config should be fixed, not silently ignored.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match Self::load_from_path(path) {
            Ok(config) => Ok(config),
            Err(ConfigError::NotFound(_)) => Ok(Self::default()),
            Err(other) => Err(other),
        }
    }
}
