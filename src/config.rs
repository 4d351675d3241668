//! Configuration management for taskwizard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, LOCAL_CONFIG_FILE_NAME, MAX_TICK_INTERVAL_MS, MAX_TIMEOUT_SECS,
    MAX_VIEWPORT_SIZE, MIN_TICK_INTERVAL_MS,
};
use crate::icons::{IconService, IconTheme};
use crate::locale::{Language, TableLocale};
use crate::render::{AnsiRenderer, PlainRenderer, Renderer};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub timeouts: TimeoutConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UiConfig {
    /// Language of built-in labels and hints ("en", "de")
    pub language: Language,
    /// Icon theme ("ascii", "unicode", "emoji")
    pub icon_theme: IconTheme,
    /// Emit ANSI colors
    pub colors: bool,
    /// Rows shown by selection lists (0 = show everything)
    pub viewport_size: usize,
    /// Show "N items above/below" next to the scroll markers
    pub show_counters: bool,
}

/// Countdown configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Countdown applied by the demo wizard (0 = disabled)
    pub default_countdown_secs: u64,
    /// Refresh interval of the remaining-time display
    pub tick_interval_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to the log file
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: Language::En,
            icon_theme: IconTheme::Ascii,
            colors: true,
            viewport_size: 10,
            show_counters: true,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_countdown_secs: 30,
            tick_interval_ms: 1000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level.
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        log::LevelFilter::from_str(&self.level).with_context(|| format!("Invalid log level '{}'", self.level))
    }
}

impl TimeoutConfig {
    /// The configured countdown, `None` when disabled.
    pub fn countdown(&self) -> Option<Duration> {
        (self.default_countdown_secs > 0).then(|| Duration::from_secs(self.default_countdown_secs))
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl UiConfig {
    pub fn icon_service(&self) -> IconService {
        IconService::new(self.icon_theme)
    }

    pub fn locale(&self) -> TableLocale {
        TableLocale::new(self.language)
    }

    /// Renderer honoring the color and icon settings.
    pub fn renderer(&self) -> Box<dyn Renderer> {
        if self.colors {
            Box::new(AnsiRenderer::new(self.icon_service()))
        } else {
            Box::new(PlainRenderer::new(self.icon_service()))
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            log::info!("Loading configuration from {}", path.display());
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(LOCAL_CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.ui.viewport_size > MAX_VIEWPORT_SIZE {
            anyhow::bail!(
                "viewport_size cannot exceed {} rows, got {}",
                MAX_VIEWPORT_SIZE,
                self.ui.viewport_size
            );
        }

        if self.timeouts.default_countdown_secs > MAX_TIMEOUT_SECS {
            anyhow::bail!(
                "default_countdown_secs cannot exceed {} ({} minutes)",
                MAX_TIMEOUT_SECS,
                MAX_TIMEOUT_SECS / 60
            );
        }

        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.timeouts.tick_interval_ms) {
            anyhow::bail!(
                "tick_interval_ms must be between {} and {}, got {}",
                MIN_TICK_INTERVAL_MS,
                MAX_TICK_INTERVAL_MS,
                self.timeouts.tick_interval_ms
            );
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# taskwizard configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join(CONFIG_FILE_NAME))
    }
}
