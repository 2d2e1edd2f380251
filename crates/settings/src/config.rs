//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use rain_core::U256;
use rain_logging::LogLevel;
use rain_settlement::{TreasuryConfig, DEFAULT_CLAIM_PERIOD_SECS};

use crate::{default_settings_path, Result, SettingsError};

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Treasury parameters used by `simulate`
    #[serde(default)]
    pub treasury: TreasurySettings,

    /// Output formatting
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,

    /// Custom settings file path (not serialized)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default path, or create defaults
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from a specific path, or create defaults
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(SettingsError::ReadError)?;
            let mut settings: Settings =
                serde_json::from_str(&content).map_err(SettingsError::ParseError)?;
            settings.config_path = Some(path.clone());
            info!("Loaded settings from {:?}", path);
            Ok(settings)
        } else {
            let mut settings = Self::default();
            settings.config_path = Some(path.clone());
            Ok(settings)
        }
    }

    /// Save settings to the configured path
    pub fn save(&self) -> Result<()> {
        let path = self.config_path.clone().unwrap_or_else(default_settings_path);
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(SettingsError::ParseError)?;
        std::fs::write(path, content).map_err(SettingsError::WriteError)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Treasury settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasurySettings {
    /// Seconds a cycle accepts claims
    #[serde(default = "default_claim_period")]
    pub claim_period_secs: u64,

    /// Smallest pool a cycle may be created with (base units)
    #[serde(default, with = "rain_core::decimal")]
    pub min_cycle_amount: U256,
}

fn default_claim_period() -> u64 {
    DEFAULT_CLAIM_PERIOD_SECS
}

impl Default for TreasurySettings {
    fn default() -> Self {
        Self {
            claim_period_secs: default_claim_period(),
            min_cycle_amount: U256::ZERO,
        }
    }
}

impl TreasurySettings {
    pub fn to_config(&self) -> TreasuryConfig {
        TreasuryConfig {
            claim_period_secs: self.claim_period_secs,
            min_cycle_amount: self.min_cycle_amount,
        }
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Decimals of the payout token when printing amounts
    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    /// Symbol printed after amounts
    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,
}

fn default_token_decimals() -> u8 {
    18
}

fn default_token_symbol() -> String {
    "USDC".to_string()
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            token_decimals: default_token_decimals(),
            token_symbol: default_token_symbol(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Level applied when `RUST_LOG` is unset
    #[serde(default)]
    pub level: LogLevel,
}
