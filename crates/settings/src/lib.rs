//! Rain Settings
//!
//! User configuration for the Rain tools.
//!
//! ## Usage
//!
//! ```no_run
//! use rain_settings::Settings;
//!
//! let mut settings = Settings::load_or_default()?;
//! settings.display.token_decimals = 6;
//! settings.save()?;
//! # Ok::<(), rain_settings::SettingsError>(())
//! ```

mod config;

pub use config::{DisplaySettings, LoggingSettings, Settings, TreasurySettings};

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(serde_json::Error),

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// `~/.rain`, or `./.rain` when no home directory is known
pub fn default_config_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rain")
}

/// Get the default settings file path
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}
