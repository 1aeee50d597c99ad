//! PWS data models
//!
//! Wire types for the `/v2/pws` endpoints and the typed reading parsed
//! from them. Every measurement is optional: stations omit sensors they do
//! not have and the API sends `null` for gaps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Envelope of both the current and the hourly history endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservationsResponse {
    /// Observation rows; the current endpoint's reading is the first one
    #[serde(default)]
    pub observations: Vec<PwsObservation>,
}

/// A raw observation row
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PwsObservation {
    /// Station identifier
    #[serde(rename = "stationID")]
    pub station_id: Option<String>,
    /// Neighborhood name configured by the station owner
    pub neighborhood: Option<String>,
    /// Observation time, RFC 3339 in UTC
    pub obs_time_utc: Option<String>,
    /// Observation time, Unix seconds
    pub epoch: Option<i64>,
    /// Long condition phrase
    pub wx_phrase_long: Option<String>,
    /// Short condition phrase
    pub wx_phrase_short: Option<String>,
    /// Provider icon code
    pub icon_code: Option<i32>,
    /// Relative humidity (%), `humidityAvg` in hourly rows
    #[serde(alias = "humidityAvg")]
    pub humidity: Option<f64>,
    /// Wind bearing (degrees), `winddirAvg` in hourly rows
    #[serde(alias = "winddirAvg")]
    pub winddir: Option<f64>,
    /// Day/night marker when the provider sends one
    #[serde(alias = "isDay")]
    pub day_or_night: Option<DayFlag>,
    /// Metric unit measurements (`units=m`)
    pub metric: Option<MetricBlock>,
}

/// Day/night marker, either `"D"`/`"N"` or a boolean
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DayFlag {
    /// Boolean form
    Bool(bool),
    /// Text form
    Text(String),
}

impl DayFlag {
    /// Interpret the marker, `None` when unrecognised
    #[must_use]
    pub fn is_day(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Text(t) => match t.trim().to_ascii_uppercase().as_str() {
                "D" | "DAY" => Some(true),
                "N" | "NIGHT" => Some(false),
                _ => None,
            },
        }
    }
}

/// Metric measurement block
///
/// Hourly rows carry aggregate names (`tempAvg`, `dewptAvg`,
/// `windspeedAvg`, `pressureMax`), accepted as aliases.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricBlock {
    /// Temperature (°C)
    #[serde(alias = "tempAvg")]
    pub temp: Option<f64>,
    /// Dew point (°C)
    #[serde(alias = "dewptAvg")]
    pub dewpt: Option<f64>,
    /// Wind speed (km/h)
    #[serde(alias = "windspeedAvg")]
    pub wind_speed: Option<f64>,
    /// Pressure (hPa)
    #[serde(alias = "pressureMax")]
    pub pressure: Option<f64>,
    /// Accumulated precipitation since local midnight (mm)
    pub precip_total: Option<f64>,
    /// Precipitation rate (mm/hr)
    pub precip_rate: Option<f64>,
}

/// A typed station reading
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PwsReading {
    pub station_id: Option<String>,
    pub neighborhood: Option<String>,
    pub condition: String,
    pub icon_code: Option<i32>,
    pub temperature_c: Option<f64>,
    pub dew_point_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub wind_direction_deg: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub precip_total_mm: Option<f64>,
    pub precip_rate_mm_per_hr: Option<f64>,
    pub is_daylight: Option<bool>,
    pub observed_at: Option<DateTime<Utc>>,
}

impl PwsReading {
    /// Display name: neighborhood if set, else station id
    #[must_use]
    pub fn station_name(&self) -> Option<&str> {
        self.neighborhood
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.station_id.as_deref())
    }
}

impl From<PwsObservation> for PwsReading {
    fn from(raw: PwsObservation) -> Self {
        let observed_at = raw
            .obs_time_utc
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|| raw.epoch.and_then(|e| DateTime::from_timestamp(e, 0)));

        let condition = raw
            .wx_phrase_long
            .filter(|p| !p.trim().is_empty())
            .or(raw.wx_phrase_short)
            .unwrap_or_default();

        let metric = raw.metric.unwrap_or_default();

        Self {
            station_id: raw.station_id,
            neighborhood: raw.neighborhood,
            condition,
            icon_code: raw.icon_code,
            temperature_c: metric.temp,
            dew_point_c: metric.dewpt,
            humidity_pct: raw.humidity,
            wind_speed_kmh: metric.wind_speed,
            wind_direction_deg: raw.winddir,
            pressure_hpa: metric.pressure,
            precip_total_mm: metric.precip_total,
            precip_rate_mm_per_hr: metric.precip_rate,
            is_daylight: raw.day_or_night.as_ref().and_then(DayFlag::is_day),
            observed_at,
        }
    }
}
