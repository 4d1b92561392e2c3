use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    provider::ServiceId,
    view::{DEFAULT_DAY_COUNT, DisplaySettings},
    window::DEFAULT_STRIDE,
};

/// Override for a single upstream service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
}

/// HTTP client settings shared by all providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    /// Nominatim rejects requests without an identifying User-Agent.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("clima/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub forecast_days: usize,
    pub hourly_stride: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { forecast_days: DEFAULT_DAY_COUNT, hourly_stride: DEFAULT_STRIDE }
    }
}

impl From<&DisplayConfig> for DisplaySettings {
    fn from(cfg: &DisplayConfig) -> Self {
        DisplaySettings::new(cfg.forecast_days, cfg.hourly_stride)
    }
}

/// Top-level configuration stored on disk.
///
/// Unit preferences are intentionally absent: they live only for a session.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Example TOML:
    /// [services.open-meteo]
    /// base_url = "..."
    #[serde(default)]
    pub services: HashMap<String, ServiceConfig>,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Config {
    /// Base URL for a service: the configured override, or the public default.
    pub fn service_base_url(&self, id: ServiceId) -> String {
        self.services
            .get(id.as_str())
            .map(|cfg| cfg.base_url.clone())
            .unwrap_or_else(|| id.default_base_url().to_string())
    }

    pub fn has_service_override(&self, id: ServiceId) -> bool {
        self.services.contains_key(id.as_str())
    }

    /// Set or replace the base URL for a service.
    pub fn upsert_service_url(&mut self, id: ServiceId, base_url: String) {
        self.services.insert(id.as_str().to_string(), ServiceConfig { base_url });
    }

    /// Drop an override so the public default applies again.
    pub fn reset_service_url(&mut self, id: ServiceId) {
        self.services.remove(id.as_str());
    }

    pub fn display_settings(&self) -> DisplaySettings {
        DisplaySettings::from(&self.display)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

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

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "clima", "clima")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
