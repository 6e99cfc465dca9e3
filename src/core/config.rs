use anyhow::{Context, Result};
use chrono::NaiveTime;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.exchangerate.host";
const DEFAULT_REFRESH_AT: &str = "12:00";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: Option<ProviderConfig>,
    /// Path of the persisted rates file. Defaults to `rates.json` in the
    /// app data directory.
    #[serde(default)]
    pub rates_path: Option<String>,
    /// UTC wall-clock time ("HH:MM") of the daily scheduled refresh.
    #[serde(default)]
    pub refresh_at: Option<String>,
    /// Timeout in seconds for provider requests.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            provider: Some(ProviderConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
            }),
            rates_path: None,
            refresh_at: None,
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location. A missing file is not
    /// an error; the defaults are enough to run every command.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxr")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_rates_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "fxr")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().join("rates.json"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        self.provider
            .as_ref()
            .map_or(DEFAULT_BASE_URL, |p| &p.base_url)
    }

    pub fn rates_path(&self) -> Result<PathBuf> {
        match &self.rates_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_rates_path(),
        }
    }

    pub fn refresh_at(&self) -> Result<NaiveTime> {
        let raw = self.refresh_at.as_deref().unwrap_or(DEFAULT_REFRESH_AT);
        NaiveTime::parse_from_str(raw, "%H:%M")
            .with_context(|| format!("Invalid refresh_at time: {raw}"))
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)
    }
}
