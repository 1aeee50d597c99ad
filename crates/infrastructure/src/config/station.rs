//! Station configuration.

use domain::{DomainError, Timezone};
use serde::{Deserialize, Serialize};

/// Station-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationConfig {
    /// IANA timezone of the station (default: `UTC`)
    ///
    /// Drives "today" for the hourly history, the daylight windows and the
    /// update labels.
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Show the short `Act. HH:mm` label instead of the dated one
    #[serde(default)]
    pub compact_label: bool,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            compact_label: false,
        }
    }
}

impl StationConfig {
    /// Parsed station timezone
    pub fn timezone(&self) -> Result<Timezone, DomainError> {
        Timezone::parse(&self.timezone)
    }
}
