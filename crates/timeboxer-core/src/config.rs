//! TOML-based application configuration.
//!
//! Two sections: `[backend]` decides whether recommendations delegate to the
//! remote service or stay fully local, `[watcher]` parameterizes idle
//! detection.
//!
//! Configuration is stored at `~/.config/timeboxer/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::error::ConfigError;
use crate::idle::IdleWatcherConfig;

/// Resolve the per-user configuration directory, creating it if needed.
///
/// Set `TIMEBOXER_ENV=dev` to keep development state in a separate directory.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("TIMEBOXER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("timeboxer-dev")
    } else {
        base_dir.join("timeboxer")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Remote backend configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the recommendation service. Unset runs fully local.
    #[serde(default)]
    pub url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    5
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/timeboxer/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub watcher: IdleWatcherConfig,
}

impl Config {
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first run.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            Ok(cfg)
        }
    }

    /// Load from disk, falling back to the defaults on any failure.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Parsed backend URL, if one is configured.
    pub fn backend_url(&self) -> Result<Option<Url>, ConfigError> {
        match &self.backend.url {
            Some(raw) => Url::parse(raw).map(Some).map_err(|e| ConfigError::InvalidValue {
                key: "backend.url".into(),
                message: e.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Per-request timeout for backend calls.
    pub fn backend_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.timeout_secs)
    }

    /// Read a value by dot-separated key, rendered as a string.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "backend.url" => Some(self.backend.url.clone().unwrap_or_default()),
            "backend.timeout_secs" => Some(self.backend.timeout_secs.to_string()),
            "watcher.interval_secs" => Some(self.watcher.interval_secs.to_string()),
            "watcher.idle_threshold_secs" => Some(self.watcher.idle_threshold_secs.to_string()),
            "watcher.cooldown_secs" => Some(self.watcher.cooldown_secs.to_string()),
            "watcher.focus_only" => Some(self.watcher.focus_only.to_string()),
            _ => None,
        }
    }

    /// Set a value by dot-separated key. Does not persist; call
    /// [`Config::save`] afterwards.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "backend.url" => {
                if value.is_empty() {
                    self.backend.url = None;
                } else {
                    Url::parse(value).map_err(|e| ConfigError::InvalidValue {
                        key: key.into(),
                        message: e.to_string(),
                    })?;
                    self.backend.url = Some(value.to_string());
                }
            }
            "backend.timeout_secs" => self.backend.timeout_secs = parse_value(key, value)?,
            "watcher.interval_secs" => self.watcher.interval_secs = parse_value(key, value)?,
            "watcher.idle_threshold_secs" => {
                self.watcher.idle_threshold_secs = parse_value(key, value)?
            }
            "watcher.cooldown_secs" => self.watcher.cooldown_secs = parse_value(key, value)?,
            "watcher.focus_only" => self.watcher.focus_only = parse_value(key, value)?,
            _ => return Err(ConfigError::UnknownKey(key.into())),
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.into(),
        message: e.to_string(),
    })
}
