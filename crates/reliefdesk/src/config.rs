//! Configuration management for reliefdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the platform config dir.
const APP_DIR_NAME: &str = "reliefdesk";

/// Default user record file name.
const USERS_FILE_NAME: &str = "users.txt";

/// Default disaster event record file name.
const EVENTS_FILE_NAME: &str = "disasters.txt";

/// Environment variable prefix.
const ENV_PREFIX: &str = "RELIEFDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `RELIEFDESK_`, sections separated
///    by `__`, e.g. `RELIEFDESK_STORAGE__DATA_DIR`)
/// 2. TOML config file at `~/.config/reliefdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Disaster event configuration.
    pub events: EventsConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory holding the record files.
    /// Defaults to the current working directory.
    pub data_dir: Option<PathBuf>,
    /// File name of the user records.
    pub users_file: String,
    /// File name of the disaster event records.
    pub events_file: String,
    /// Replace record files via write-to-temp-then-rename.
    pub atomic_writes: bool,
}

/// Disaster event configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsConfig {
    /// How new event ids are chosen.
    pub id_strategy: IdStrategy,
    /// Exclusive upper bound for randomly drawn ids.
    pub id_range: u32,
}

/// Event id generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Draw from `[0, id_range)`, re-drawing ids already in use.
    #[default]
    Random,
    /// One past the largest id in use.
    Sequential,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None, // Resolved to the working directory at runtime
            users_file: USERS_FILE_NAME.to_string(),
            events_file: EVENTS_FILE_NAME.to_string(),
            atomic_writes: true,
        }
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Random,
            id_range: 1000,
        }
    }
}

impl Config {
    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        for (key, name) in [
            ("users_file", &self.storage.users_file),
            ("events_file", &self.storage.events_file),
        ] {
            if name.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "{key} must not be empty"
                )));
            }
        }

        if self.storage.users_file == self.storage.events_file {
            return Err(Error::config_validation(format!(
                "users_file and events_file must differ (both are '{}')",
                self.storage.users_file
            )));
        }

        if self.events.id_range == 0 {
            return Err(Error::config_validation(
                "id_range must be greater than 0",
            ));
        }

        Ok(())
    }

    /// Get the data directory, resolving the default if not set.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Path to the user record file.
    #[must_use]
    pub fn users_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.users_file)
    }

    /// Path to the disaster event record file.
    #[must_use]
    pub fn events_path(&self) -> PathBuf {
        self.data_dir().join(&self.storage.events_file)
    }
}
