//! Display model - The screen-ready record persisted for the rendering surface

use serde::{Deserialize, Serialize};

use crate::value_objects::IconCategory;

/// Storage keys of the persisted display model and credentials
pub mod keys {
    /// Formatted temperature
    pub const TEMP: &str = "temp";
    /// Condition phrase
    pub const CONDITION: &str = "condition";
    /// Provider icon code
    pub const CONDITION_CODE: &str = "conditionCode";
    /// Wind speed
    pub const WIND: &str = "wind";
    /// Wind bearing in degrees
    pub const WIND_DIR: &str = "windDir";
    /// Pressure
    pub const PRESSURE: &str = "pressure";
    /// Accumulated precipitation
    pub const PRECIP: &str = "precip";
    /// Precipitation rate
    pub const PRECIP_RATE: &str = "precipRate";
    /// Dew point
    pub const DEW_POINT: &str = "dewPoint";
    /// Relative humidity
    pub const HUMIDITY: &str = "humidity";
    /// Last update time (`HH:mm`)
    pub const UPDATED_AT_TIME: &str = "updatedAtTime";
    /// Last update date (`DD/MM`)
    pub const UPDATED_AT_DATE: &str = "updatedAtDate";
    /// Classified icon category
    pub const ICON: &str = "icon";
    /// Explicit daylight flag
    pub const IS_DAY: &str = "isDay";
    /// Station display name
    pub const STATION: &str = "station";
    /// Provider API key
    pub const API_KEY: &str = "apiKey";
    /// Station identifier
    pub const STATION_ID: &str = "stationId";
}

/// Text stored for a value the station did not report
pub const UNKNOWN_VALUE: &str = "--";

/// Formatted observation ready to persist
///
/// Always complete: every key is written on every successful cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayModel {
    pub temperature: String,
    pub condition: String,
    pub condition_code: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub pressure: String,
    pub precip_total: String,
    pub precip_rate: String,
    pub dew_point: String,
    pub humidity: String,
    pub is_day: String,
    pub station: String,
    pub icon: IconCategory,
    pub updated_at_time: String,
    pub updated_at_date: String,
}

impl DisplayModel {
    /// Flatten into `(key, value)` pairs for an atomic store write
    #[must_use]
    pub fn to_entries(&self) -> Vec<(String, String)> {
        [
            (keys::TEMP, self.temperature.clone()),
            (keys::CONDITION, self.condition.clone()),
            (keys::CONDITION_CODE, self.condition_code.clone()),
            (keys::WIND, self.wind_speed.clone()),
            (keys::WIND_DIR, self.wind_direction.clone()),
            (keys::PRESSURE, self.pressure.clone()),
            (keys::PRECIP, self.precip_total.clone()),
            (keys::PRECIP_RATE, self.precip_rate.clone()),
            (keys::DEW_POINT, self.dew_point.clone()),
            (keys::HUMIDITY, self.humidity.clone()),
            (keys::IS_DAY, self.is_day.clone()),
            (keys::STATION, self.station.clone()),
            (keys::ICON, self.icon.as_str().to_string()),
            (keys::UPDATED_AT_TIME, self.updated_at_time.clone()),
            (keys::UPDATED_AT_DATE, self.updated_at_date.clone()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
    }
}
