//! Application configuration.
//!
//! Values come from `config.toml` (in the data directory unless a path is
//! given) and can be overridden through environment variables:
//!
//! - `TRACKER_DATA_DIR`: where records and the roster are stored
//! - `TRACKER_WEBHOOK_URL`: endpoint saved records are pushed to; empty disables sync

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, TrackerError};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_SYNC_TIMEOUT_SECS: u64 = 10;
const DATA_DIR_NAME: &str = ".tracker";

pub const ENV_DATA_DIR: &str = "TRACKER_DATA_DIR";
pub const ENV_WEBHOOK_URL: &str = "TRACKER_WEBHOOK_URL";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TrackerConfig {
    pub data_dir: Option<PathBuf>,
    pub webhook_url: Option<String>,
    pub sync_timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            webhook_url: None,
            sync_timeout_secs: DEFAULT_SYNC_TIMEOUT_SECS,
        }
    }
}

/// `~/.tracker`
pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| TrackerError::Config("Could not determine home directory".to_string()))?;
    Ok(home_dir.join(DATA_DIR_NAME))
}

impl TrackerConfig {
    /// Loads the configuration. An explicit `path` must exist; the default
    /// location is optional and falls back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = default_data_dir()?.join(CONFIG_FILE_NAME);
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Attempting to load configuration from: {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| {
            TrackerError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            TrackerError::Config(msg) => TrackerError::Config(format!("{:?}: {}", path, msg)),
            other => other,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: TrackerConfig = toml::from_str(contents)
            .map_err(|e| TrackerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.normalize();
        Ok(config)
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.trim().is_empty()) {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup(ENV_WEBHOOK_URL) {
            self.webhook_url = Some(url);
        }
        self.normalize();
    }

    fn normalize(&mut self) {
        self.webhook_url = self
            .webhook_url
            .take()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());
        if self.sync_timeout_secs == 0 {
            self.sync_timeout_secs = DEFAULT_SYNC_TIMEOUT_SECS;
        }
    }

    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    pub fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_parse_full_config() {
        let config = TrackerConfig::from_toml_str(
            r#"
            data_dir = "/tmp/tracker"
            webhook_url = "https://example.com/hook"
            sync_timeout_secs = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/tracker")));
        assert_eq!(config.webhook_url.as_deref(), Some("https://example.com/hook"));
        assert_eq!(config.sync_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TrackerConfig::from_toml_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TrackerConfig::from_toml_str("sync_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_DATA_DIR, "/srv/tracker"),
            (ENV_WEBHOOK_URL, "  http://localhost:9000/hook "),
        ]
        .into_iter()
        .collect();

        let mut config = TrackerConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.resolved_data_dir().unwrap(), PathBuf::from("/srv/tracker"));
        assert_eq!(config.webhook_url.as_deref(), Some("http://localhost:9000/hook"));
    }

    #[test]
    fn test_blank_webhook_env_disables_sync() {
        let mut config = TrackerConfig::from_toml_str("webhook_url = \"https://example.com\"").unwrap();
        config.apply_env_overrides(|k| (k == ENV_WEBHOOK_URL).then(String::new));
        assert_eq!(config.webhook_url, None);
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = TrackerConfig::from_file(Path::new("/definitely/not/here/config.toml"));
        assert!(matches!(result, Err(TrackerError::Config(_))));
    }
}
