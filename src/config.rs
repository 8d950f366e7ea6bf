//! Client configuration.
//!
//! Values are layered: built-in defaults, then the optional TOML file (`config` feature), then
//! environment variables, then command-line flags applied by the binary.

use crate::error::{NavigatorError, Result};
use crate::render::ui::theme::ColorTheme;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_THEME: &str = "default";

pub const ENV_ENDPOINT: &str = "POLICY_NAVIGATOR_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "POLICY_NAVIGATOR_TIMEOUT_SECS";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the analysis service, without the `/api/...` path
    pub endpoint: String,
    pub timeout: Duration,
    pub theme: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// On-disk shape of the config file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,
}

impl ClientConfig {
    /// Load defaults, the config file (explicit path or the default location) and environment.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let path = explicit_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);
        if let Some(path) = path {
            if let Some(file) = read_file_config(&path, explicit_path.is_some())? {
                config.apply_file(file);
            }
        }

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) {
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        if let Some(theme) = file.theme {
            self.theme = theme;
        }
    }

    /// Apply environment overrides through `lookup` so tests need not touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                NavigatorError::config(format!("{ENV_TIMEOUT_SECS} must be a whole number, got '{raw}'"))
            })?;
            self.timeout = Duration::from_secs(secs);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(NavigatorError::config("timeout must be greater than zero"));
        }
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(NavigatorError::config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if ColorTheme::by_name(&self.theme).is_none() {
            return Err(NavigatorError::config(format!(
                "unknown theme '{}' (expected default, monochrome or high-contrast)",
                self.theme
            )));
        }
        Ok(())
    }

    /// Theme named by this config, falling back to the default theme.
    pub fn color_theme(&self) -> ColorTheme {
        ColorTheme::by_name(&self.theme).unwrap_or_default()
    }
}

#[cfg(feature = "config")]
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("policy-navigator").join("config.toml"))
}

#[cfg(not(feature = "config"))]
fn default_config_path() -> Option<PathBuf> {
    None
}

#[cfg(feature = "config")]
fn read_file_config(path: &Path, required: bool) -> Result<Option<FileConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound && !required => {
            log::debug!("no config file at {}", path.display());
            return Ok(None);
        }
        Err(err) => {
            return Err(NavigatorError::config(format!(
                "cannot read {}: {err}",
                path.display()
            )))
        }
    };

    let parsed = toml::from_str(&contents).map_err(|err| {
        NavigatorError::config(format!("invalid config file {}: {err}", path.display()))
    })?;
    log::debug!("loaded config from {}", path.display());
    Ok(Some(parsed))
}

#[cfg(not(feature = "config"))]
fn read_file_config(path: &Path, required: bool) -> Result<Option<FileConfig>> {
    if required {
        return Err(NavigatorError::config(format!(
            "cannot load {}: built without the `config` feature",
            path.display()
        )));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_file() {
        let mut config = ClientConfig::default();
        config.apply_file(FileConfig {
            endpoint: Some("http://file:1".to_string()),
            timeout_secs: Some(5),
            theme: Some("monochrome".to_string()),
        });
        config
            .apply_env(env(&[(ENV_ENDPOINT, "http://env:2")]))
            .unwrap();

        assert_eq!(config.endpoint, "http://env:2");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.theme, "monochrome");
    }

    #[test]
    fn blank_env_endpoint_is_ignored() {
        let mut config = ClientConfig::default();
        config.apply_env(env(&[(ENV_ENDPOINT, "  ")])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn bad_env_timeout_is_rejected() {
        let mut config = ClientConfig::default();
        let err = config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, NavigatorError::ConfigError { .. }));
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut config = ClientConfig {
            timeout: Duration::ZERO,
            ..ClientConfig::default()
        };
        assert!(config.validate().is_err());

        config.timeout = Duration::from_secs(1);
        config.endpoint = "ftp://example".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "https://example".to_string();
        config.theme = "neon".to_string();
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn reads_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "endpoint = \"https://policy.example\"\ntimeout_secs = 30\n",
        )
        .unwrap();

        let file = read_file_config(&path, true).unwrap().unwrap();
        assert_eq!(file.endpoint.as_deref(), Some("https://policy.example"));
        assert_eq!(file.timeout_secs, Some(30));
        assert_eq!(file.theme, None);
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_only_fatal_when_explicit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(read_file_config(&path, false).unwrap().is_none());
        assert!(read_file_config(&path, true).is_err());
    }

    #[cfg(feature = "config")]
    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "endpiont = \"typo\"\n").unwrap();
        assert!(read_file_config(&path, true).is_err());
    }
}
