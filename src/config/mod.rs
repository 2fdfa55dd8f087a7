use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::poll::DEFAULT_POLL_INTERVAL;
use crate::text::readability::DEFAULT_MIN_LENGTH;

/// Optional hex overrides for the badge colors
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub danger: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Locale tag that overrides the environment (e.g. "en-US")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// Delay between condition checks
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Passages shorter than this are not graded
    #[serde(default = "default_min_length")]
    pub readability_min_length: usize,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_min_length() -> usize {
    DEFAULT_MIN_LENGTH
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            locale: None,
            poll_interval_ms: default_poll_interval_ms(),
            readability_min_length: default_min_length(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("namesake");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Ok(path) => Self::load_from(&path),
            Err(_) => Ok(AppConfig::default()),
        }
    }

    /// Load config from a specific file, writing defaults if it is missing
    /// or unreadable
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => {
                    match toml::from_str(&content) {
                        Ok(config) => return Ok(config),
                        Err(e) => {
                            tracing::warn!("Failed to parse config: {}", e);
                            return Ok(AppConfig::default());
                        }
                    }
                }
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        if let Err(e) = config.save_to(path) {
            tracing::debug!("Could not write default config: {}", e);
        }
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(&self.cleaned())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Copy with invalid values reset before saving
    fn cleaned(&self) -> Self {
        let mut clean_config = self.clone();

        if clean_config.poll_interval_ms == 0 {
            clean_config.poll_interval_ms = default_poll_interval_ms();
        }

        // Drop empty or unparsable locale tags
        if let Some(locale) = &clean_config.locale {
            if crate::locale::LocaleTag::parse(locale).is_err() {
                clean_config.locale = None;
            }
        }

        // Drop theme entries that are not hex colors
        for slot in [
            &mut clean_config.theme.success,
            &mut clean_config.theme.warning,
            &mut clean_config.theme.danger,
        ] {
            if slot.as_deref().and_then(crate::theme::Theme::parse_hex_color).is_none() {
                *slot = None;
            }
        }

        clean_config
    }

    /// Poll interval, never zero
    pub fn poll_interval(&self) -> std::time::Duration {
        if self.poll_interval_ms == 0 {
            DEFAULT_POLL_INTERVAL
        } else {
            std::time::Duration::from_millis(self.poll_interval_ms)
        }
    }
}
