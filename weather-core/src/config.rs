use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Place fetched on startup and by the retry action.
pub const DEFAULT_PLACE: &str = "London";

fn default_place() -> String {
    DEFAULT_PLACE.to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_place = "London"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key, passed as the `appid` query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_place")]
    pub default_place: String,

    /// Override for the provider base URL, e.g. a local mock server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_place: default_place(),
            base_url: None,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Apply `OPENWEATHER_API_KEY` on top of the stored settings.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key.trim().to_string());
        }
        self
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Returns the API key, if present and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Store a new default place; blank input is ignored.
    pub fn set_default_place(&mut self, place: &str) {
        let place = place.trim();
        if !place.is_empty() {
            self.default_place = place.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_key_and_london() {
        let cfg = Config::default();

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.default_place, DEFAULT_PLACE);
        assert_eq!(cfg.base_url, None);
    }

    #[test]
    fn parses_partial_toml() {
        let cfg = Config::from_toml(r#"api_key = "OPEN_KEY""#).unwrap();

        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
        assert_eq!(cfg.default_place, DEFAULT_PLACE);
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("OPEN_KEY".into());
        cfg.set_default_place("  Paris ");

        let toml = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&toml).unwrap();

        assert_eq!(back.api_key(), Some("OPEN_KEY"));
        assert_eq!(back.default_place, "Paris");
        assert!(!toml.contains("base_url"));
    }

    #[test]
    fn blank_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        cfg.set_default_place("  ");

        assert_eq!(cfg.api_key(), None);
        assert_eq!(cfg.default_place, DEFAULT_PLACE);
    }

    #[test]
    fn env_key_overrides_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let cfg = cfg.with_api_key_override(Some("FROM_ENV".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));

        let cfg = cfg.with_api_key_override(Some(" ".into()));
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));

        let cfg = cfg.with_api_key_override(None);
        assert_eq!(cfg.api_key(), Some("FROM_ENV"));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("api_key = ").is_err());
    }
}
