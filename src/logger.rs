//! Logging setup.
//!
//! The `log` macros used across the crate are routed through a `fern`
//! dispatcher into the log file, never to the terminal the wizard draws on.
//! A copy of every formatted line is kept in memory so a host application can
//! show recent logs.

use crate::config::LoggingConfig;
use crate::constants::{APP_DIR_NAME, LOG_FILE_NAME};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

const TIMESTAMP_FORMAT: &str = "%H:%M:%S%.3f";

/// Shared in-memory log buffer, filled by the installed dispatcher.
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    enabled: bool,
    level: log::LevelFilter,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled: false,
            level: log::LevelFilter::Info,
        }
    }

    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        Ok(Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            enabled: config.enabled,
            level: config.level_filter()?,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> log::LevelFilter {
        self.level
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        self.push(format!("[{}] {}", timestamp, message));
    }

    fn push(&self, line: String) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.push(line);
        }
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Install the global dispatcher. Fails if a logger is already set.
    pub fn install(&self) -> Result<()> {
        let path = Self::get_log_file_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

        let memory = self.clone();
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] [{}] [{}] {}",
                    chrono::Local::now().format(TIMESTAMP_FORMAT),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .chain(file)
            .chain(fern::Output::call(move |record| memory.push(record.args().to_string())))
            .apply()
            .context("Failed to install logger")?;

        log::debug!("Logging to {}", path.display());
        Ok(())
    }

    /// Location of the log file inside the user's cache directory.
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine cache directory"))
            .map(|dir| dir.join(APP_DIR_NAME).join(LOG_FILE_NAME))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Build a [`Logger`] from `config` and install it when logging is enabled.
pub fn init(config: &LoggingConfig) -> Result<Logger> {
    let logger = Logger::from_config(config)?;
    if logger.is_enabled() {
        logger.install()?;
    }
    Ok(logger)
}
