use anyhow::{Context, Result, anyhow, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Credentials for the OpenWeatherMap API family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenWeatherMapConfig {
    pub api_key: String,

    /// Override for the API host, e.g. a local proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// [openweathermap]
/// api_key = "..."
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub openweathermap: OpenWeatherMapConfig,
}

impl Config {
    pub fn new(api_key: String) -> Self {
        Self { openweathermap: OpenWeatherMapConfig { api_key, base_url: None } }
    }

    pub fn api_key(&self) -> &str {
        &self.openweathermap.api_key
    }

    pub fn base_url(&self) -> &str {
        self.openweathermap.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Load config from `path`. A missing file or an empty key is an error:
    /// every lookup needs the credential.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "Config file not found: {}\n\
                 Hint: run `weather --configure` and enter your OpenWeatherMap API key.",
                path.display()
            );
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if cfg.openweathermap.api_key.trim().is_empty() {
            bail!(
                "Config file {} has an empty [openweathermap] api_key.\n\
                 Hint: run `weather --configure` and enter your OpenWeatherMap API key.",
                path.display()
            );
        }

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the default config file.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-lookup", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// `explicit` if given, otherwise [`Config::default_path`].
    pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf> {
        match explicit {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_path(),
        }
    }
}
