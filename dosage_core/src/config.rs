//! Configuration file support for dosecalc.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/dosecalc/config.toml`.

use crate::safety::MAX_SAFE_DAILY_DOSE_MG;
use crate::{DoseType, Error, Frequency, MedicationType, Result, WeightUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: FormDefaults,

    #[serde(default)]
    pub safety: SafetyConfig,
}

/// Selections a fresh or reset form starts with
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct FormDefaults {
    #[serde(default)]
    pub weight_unit: WeightUnit,

    #[serde(default)]
    pub medication_type: MedicationType,

    #[serde(default)]
    pub dose_type: DoseType,

    #[serde(default, rename = "frequency_hours")]
    pub frequency: Frequency,
}

/// Safety threshold configuration
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SafetyConfig {
    #[serde(default = "default_max_daily_dose_mg")]
    pub max_daily_dose_mg: f64,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_daily_dose_mg: default_max_daily_dose_mg(),
        }
    }
}

fn default_max_daily_dose_mg() -> f64 {
    MAX_SAFE_DAILY_DOSE_MG
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("dosecalc").join("config.toml"))
    }

    /// Reject settings the engine cannot work with
    pub fn validate(&self) -> Result<()> {
        let limit = self.safety.max_daily_dose_mg;
        if !limit.is_finite() || limit <= 0.0 {
            return Err(Error::Config(format!(
                "safety.max_daily_dose_mg must be a positive number, got {}",
                limit
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
