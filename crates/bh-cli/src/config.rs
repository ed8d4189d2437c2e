//! Configuration loading and management.

use std::path::{Path, PathBuf};

use bh_core::{ClassifierConfig, MealWindows, ReferenceWeek};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Week that weekday labels are pinned to.
    pub reference: ReferenceWeek,

    /// Timeline replication period in days.
    pub period_days: u32,

    /// Clock ranges per meal.
    pub meals: MealWindows,
}

impl Default for Config {
    fn default() -> Self {
        Self::from(ClassifierConfig::default())
    }
}

impl From<ClassifierConfig> for Config {
    fn from(config: ClassifierConfig) -> Self {
        Self {
            reference: config.reference,
            period_days: config.period_days,
            meals: config.meals,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (BH_*, nested keys split on "__")
        figment = figment.merge(Env::prefixed("BH_").split("__"));

        figment.extract()
    }

    /// Converts into the classifier's settings, checking the period.
    pub fn classifier(&self) -> Result<ClassifierConfig, bh_core::ScheduleError> {
        let config = ClassifierConfig {
            reference: self.reference,
            period_days: self.period_days,
            meals: self.meals.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Returns the platform-specific config directory for bh.
///
/// On Linux: `~/.config/bh`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bh"))
}
