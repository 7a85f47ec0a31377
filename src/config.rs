// src/config.rs

use crate::core::errors::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const SUPPORTED_LOCALES: &[&str] = &["en", "id"];

const ENV_API_URL: &str = "SENA_API_URL";
const ENV_TIMEOUT: &str = "SENA_REQUEST_TIMEOUT_SECS";
const ENV_LOCALE: &str = "SENA_LOCALE";

/// Runtime settings.
///
/// Resolved in order: built-in defaults, then `config.toml` in the config
/// directory, then `SENA_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Root of the SENA backend; the scan and auth endpoints hang off it.
    pub api_url: String,
    pub request_timeout_secs: u64,
    pub locale: String,
    /// Overrides the platform data directory for history and session files.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            locale: "en".to_string(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Loads `config.toml` from `config_dir` (if present) and applies env overrides.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(&config_dir.join(CONFIG_FILE))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        debug!(api_url = %config.api_url, locale = %config.locale, "Configuration loaded.");
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults.");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path: path.to_path_buf(), source }),
        }
    }

    pub fn from_toml(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Applies overrides from a variable lookup (the process environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT.to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(locale) = lookup(ENV_LOCALE) {
            self.locale = locale;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.api_url).map_err(|source| ConfigError::InvalidBaseUrl {
            value: self.api_url.clone(),
            source,
        })?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs".to_string(),
                value: "0".to_string(),
            });
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue { key: "locale".to_string(), value: self.locale.clone() });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
