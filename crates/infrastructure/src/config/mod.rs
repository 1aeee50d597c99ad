//! Application configuration
//!
//! Split into focused sub-modules:
//! - `station`: station timezone and label layout
//! - `store`: SQLite preference store and namespace names
//! - `schedule`: daemon cron schedule
//! - `resilience`: backoff on retry, logging
//!
//! The PWS HTTP section reuses [`integration_pws::PwsConfig`] as is.

mod resilience;
mod schedule;
mod station;
mod store;

use std::path::Path;

use integration_pws::PwsConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use resilience::{RetryAppConfig, TelemetryAppConfig};
pub use schedule::ScheduleConfig;
pub use station::StationConfig;
pub use store::StoreConfig;

/// Prefix of environment variable overrides (e.g. `PWSWIDGET_STORE__PATH`)
pub const ENV_PREFIX: &str = "PWSWIDGET";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Weather.com PWS API settings
    #[serde(default)]
    pub pws: PwsConfig,

    /// Station settings
    #[serde(default)]
    pub station: StationConfig,

    /// Preference store settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Daemon schedule
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Backoff applied by the daemon when a cycle asks for a retry
    #[serde(default)]
    pub retry: RetryAppConfig,

    /// Log output
    #[serde(default)]
    pub telemetry: TelemetryAppConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit file, or `config.toml` when `None`
    ///
    /// An explicit file must exist. Environment variables override both.
    pub fn load_from(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let file_source = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name("config").required(false),
        };

        let builder = config::Config::builder()
            .set_default("station.timezone", StationConfig::default().timezone)?
            .set_default("store.path", StoreConfig::default().path)?
            .add_source(file_source)
            // e.g. PWSWIDGET_STATION__TIMEZONE=Europe/Madrid
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        debug!(
            base_url = %config.pws.base_url,
            timezone = %config.station.timezone,
            store = %config.store.path,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Reject values that would only fail later, at the first cycle
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        self.station
            .timezone()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        self.schedule
            .validate()
            .map_err(config::ConfigError::Message)?;
        if self.store.max_connections == 0 {
            return Err(config::ConfigError::Message(
                "store.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
