//! Resilience configurations: retry backoff and log output.

use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

// ==============================
// Telemetry Configuration
// ==============================

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryAppConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TelemetryAppConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            json: false,
        }
    }
}

impl TelemetryAppConfig {
    /// Convert to `telemetry::TelemetryConfig` for `init_telemetry`
    #[must_use]
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_filter: self.log_filter.clone(),
            json: self.json,
            ..TelemetryConfig::default()
        }
    }
}

// ==============================
// Retry Configuration
// ==============================

/// Backoff the daemon applies when a cycle reports `Retry`
///
/// Delays are in seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryAppConfig {
    /// Delay before the first re-run in seconds (default: 60)
    #[serde(default = "default_retry_initial_delay")]
    pub initial_delay_secs: u64,

    /// Upper bound of a single delay in seconds (default: 600)
    #[serde(default = "default_retry_max_delay")]
    pub max_delay_secs: u64,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_retry_multiplier")]
    pub multiplier: f64,

    /// Re-runs after the first failed cycle (default: 3)
    #[serde(default = "default_retry_max_retries")]
    pub max_retries: u32,
}

const fn default_retry_initial_delay() -> u64 {
    60
}

const fn default_retry_max_delay() -> u64 {
    600
}

const fn default_retry_multiplier() -> f64 {
    2.0
}

const fn default_retry_max_retries() -> u32 {
    3
}

impl Default for RetryAppConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: default_retry_initial_delay(),
            max_delay_secs: default_retry_max_delay(),
            multiplier: default_retry_multiplier(),
            max_retries: default_retry_max_retries(),
        }
    }
}

impl RetryAppConfig {
    /// Convert to `retry::RetryConfig` for use with `with_retry`
    #[must_use]
    pub const fn to_retry_config(&self) -> crate::retry::RetryConfig {
        crate::retry::RetryConfig::new(
            self.initial_delay_secs.saturating_mul(1000),
            self.max_delay_secs.saturating_mul(1000),
            self.multiplier,
            self.max_retries,
        )
    }
}
