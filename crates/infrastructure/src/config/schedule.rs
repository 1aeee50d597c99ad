//! Daemon schedule configuration.

use serde::{Deserialize, Serialize};

use super::default_true;

/// Every 30 minutes, at second 0
pub const EVERY_30_MINUTES: &str = "0 */30 * * * *";

/// When the daemon runs refresh cycles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression (6 fields: sec min hour day month weekday)
    #[serde(default = "default_cron")]
    pub cron: String,

    /// Run one cycle right after the daemon starts (default: true)
    #[serde(default = "default_true")]
    pub refresh_on_start: bool,
}

fn default_cron() -> String {
    EVERY_30_MINUTES.to_string()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            cron: default_cron(),
            refresh_on_start: true,
        }
    }
}

impl ScheduleConfig {
    /// Check that the cron expression parses
    pub fn validate(&self) -> Result<(), String> {
        self.cron
            .parse::<cron::Schedule>()
            .map(|_| ())
            .map_err(|e| format!("invalid schedule.cron `{}`: {e}", self.cron))
    }
}
