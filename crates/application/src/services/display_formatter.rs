//! Display formatting
//!
//! Pure, total functions turning observations into the persisted text
//! fields and persisted text into the lines a widget shows. Numbers are
//! always written with `.` as decimal separator, independent of locale.

use chrono::{DateTime, Datelike, Timelike};
use chrono_tz::Tz;
use domain::{CompassPoint, DisplayModel, IconCategory, Observation, UNKNOWN_VALUE};

use super::weather_classifier::{ClassifierInput, classify};
use crate::ports::WidgetView;

/// Prefix of the "last updated" label
pub const UPDATED_PREFIX: &str = "Act.";

/// Values shown when nothing has been stored yet
pub mod defaults {
    pub const TEMP: &str = "--";
    pub const CONDITION: &str = "clear";
    pub const STATION: &str = "Estación";
    pub const PRECIP: &str = "0.0";
    pub const HUMIDITY: &str = "--";
    pub const WIND: &str = "0";
    pub const PRESSURE: &str = "--";
    pub const PRECIP_RATE: &str = "0.0";
    pub const DEW_POINT: &str = "0.0";
}

// ── Numbers ─────────────────────────────────────────────────────

/// Parse stored decimal text, `None` for anything not a finite number
#[must_use]
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Fixed-point text, or the unknown sentinel
#[must_use]
pub fn format_fixed(value: Option<f64>, decimals: usize) -> String {
    value
        .filter(|v| v.is_finite())
        .map_or_else(|| UNKNOWN_VALUE.to_string(), |v| format!("{v:.decimals$}"))
}

/// Temperature with one decimal and a degree sign
///
/// Text that is not a number is kept as is, still followed by `°`.
#[must_use]
pub fn format_temperature(raw: &str) -> String {
    parse_decimal(raw).map_or_else(|| format!("{raw}°"), |v| format!("{v:.1}°"))
}

// ── Wind ────────────────────────────────────────────────────────

/// Whole-degree bearing text, empty when unknown
#[must_use]
pub fn format_bearing(degrees: Option<f64>) -> String {
    degrees
        .filter(|v| v.is_finite())
        .map_or_else(String::new, |v| format!("{:.0}", v.rem_euclid(360.0)))
}

/// 16-point compass label for stored bearing text, empty when not numeric
#[must_use]
pub fn wind_direction_label(bearing: Option<&str>) -> String {
    bearing
        .and_then(CompassPoint::from_bearing_text)
        .map_or_else(String::new, |p| p.label().to_string())
}

/// `"<speed> km/h <dir>"`, or `"<speed> km/h"` without a usable bearing
#[must_use]
pub fn wind_label(speed: &str, bearing: Option<&str>) -> String {
    let direction = wind_direction_label(bearing);
    if direction.is_empty() {
        format!("{speed} km/h")
    } else {
        format!("{speed} km/h {direction}")
    }
}

// ── Daylight ────────────────────────────────────────────────────

/// Coarse seasonal daylight window
///
/// Not a sunrise/sunset computation: April to September count hours 7..=20
/// as day, the other months hours 8..=18.
#[must_use]
pub fn is_daytime_by_season(month: u32, hour: u32) -> bool {
    if (4..=9).contains(&month) {
        (7..=20).contains(&hour)
    } else {
        (8..=18).contains(&hour)
    }
}

/// Parse a stored daylight flag: `1/true/yes` or `0/false/no`
#[must_use]
pub fn parse_daylight_flag(raw: Option<&str>) -> Option<bool> {
    match raw?.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// Text stored for an explicit flag, empty when unknown
#[must_use]
pub fn daylight_flag_text(flag: Option<bool>) -> String {
    match flag {
        Some(true) => "1".to_string(),
        Some(false) => "0".to_string(),
        None => String::new(),
    }
}

/// Explicit flag when known, else the seasonal window at local time
#[must_use]
pub fn resolve_daylight(explicit: Option<bool>, local_now: &DateTime<Tz>) -> bool {
    explicit.unwrap_or_else(|| is_daytime_by_season(local_now.month(), local_now.hour()))
}

// ── Timestamps ──────────────────────────────────────────────────

/// `HH:mm`
#[must_use]
pub fn updated_time(local: &DateTime<Tz>) -> String {
    local.format("%H:%M").to_string()
}

/// `DD/MM`
#[must_use]
pub fn updated_date(local: &DateTime<Tz>) -> String {
    local.format("%d/%m").to_string()
}

// ── Persisted model ─────────────────────────────────────────────

/// Build the persisted display model for a merged observation
///
/// `station_fallback` is shown when the provider sent no station name.
#[must_use]
pub fn build_display_model(
    observation: &Observation,
    icon: IconCategory,
    station_fallback: &str,
    local_now: &DateTime<Tz>,
) -> DisplayModel {
    DisplayModel {
        temperature: format_fixed(observation.temperature_c, 1),
        condition: observation.condition.clone(),
        condition_code: observation
            .condition_code
            .map_or_else(|| UNKNOWN_VALUE.to_string(), |c| c.to_string()),
        wind_speed: format_fixed(observation.wind_speed_kmh, 1),
        wind_direction: format_bearing(observation.wind_direction_deg),
        pressure: format_fixed(observation.pressure_hpa, 1),
        precip_total: format_fixed(observation.precip_total_mm, 2),
        precip_rate: format_fixed(observation.precip_rate_mm_per_hr, 2),
        dew_point: format_fixed(observation.dew_point_c, 1),
        humidity: format_fixed(observation.humidity_pct, 0),
        is_day: daylight_flag_text(observation.is_daylight),
        station: observation
            .station_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(station_fallback)
            .to_string(),
        icon,
        updated_at_time: updated_time(local_now),
        updated_at_date: updated_date(local_now),
    }
}

// ── Widget view ─────────────────────────────────────────────────

/// Raw text values as read back from the preference store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredReadings {
    pub temp: Option<String>,
    pub condition: Option<String>,
    pub station: Option<String>,
    pub precip: Option<String>,
    pub humidity: Option<String>,
    pub wind: Option<String>,
    pub wind_dir: Option<String>,
    pub pressure: Option<String>,
    pub precip_rate: Option<String>,
    pub dew_point: Option<String>,
    pub is_day: Option<String>,
    pub updated_at_time: Option<String>,
    pub updated_at_date: Option<String>,
}

impl From<&DisplayModel> for StoredReadings {
    fn from(model: &DisplayModel) -> Self {
        Self {
            temp: Some(model.temperature.clone()),
            condition: Some(model.condition.clone()),
            station: Some(model.station.clone()),
            precip: Some(model.precip_total.clone()),
            humidity: Some(model.humidity.clone()),
            wind: Some(model.wind_speed.clone()),
            wind_dir: Some(model.wind_direction.clone()),
            pressure: Some(model.pressure.clone()),
            precip_rate: Some(model.precip_rate.clone()),
            dew_point: Some(model.dew_point.clone()),
            is_day: Some(model.is_day.clone()),
            updated_at_time: Some(model.updated_at_time.clone()),
            updated_at_date: Some(model.updated_at_date.clone()),
        }
    }
}

/// Turn stored text into widget lines
///
/// Missing values fall back to [`defaults`]; timestamps fall back to
/// `local_now` only when none were ever stored. The icon is recomputed here
/// so the day/night variant follows the clock between refreshes.
#[must_use]
pub fn render_view(stored: &StoredReadings, local_now: &DateTime<Tz>) -> WidgetView {
    let text = |value: &Option<String>, default: &'static str| {
        value.clone().unwrap_or_else(|| default.to_string())
    };

    let temp = text(&stored.temp, defaults::TEMP);
    let condition = text(&stored.condition, defaults::CONDITION);
    let humidity = text(&stored.humidity, defaults::HUMIDITY);
    let wind = text(&stored.wind, defaults::WIND);
    let precip_rate = text(&stored.precip_rate, defaults::PRECIP_RATE);
    let dew_point = text(&stored.dew_point, defaults::DEW_POINT);
    let time = stored
        .updated_at_time
        .clone()
        .unwrap_or_else(|| updated_time(local_now));
    let date = stored
        .updated_at_date
        .clone()
        .unwrap_or_else(|| updated_date(local_now));

    let is_daylight = resolve_daylight(parse_daylight_flag(stored.is_day.as_deref()), local_now);
    let icon = classify(&ClassifierInput {
        condition: &condition,
        temperature_c: parse_decimal(&temp),
        dew_point_c: parse_decimal(&dew_point),
        precip_rate_mm_per_hr: parse_decimal(&precip_rate),
        wind_speed_kmh: parse_decimal(&wind),
        humidity_pct: parse_decimal(&humidity),
        is_daylight,
    });

    WidgetView {
        temperature: format_temperature(&temp),
        humidity: format!("{humidity}%"),
        precipitation: format!("{} mm", text(&stored.precip, defaults::PRECIP)),
        wind: wind_label(&wind, stored.wind_dir.as_deref()),
        pressure: format!("{} hPa", text(&stored.pressure, defaults::PRESSURE)),
        precip_rate: format!("{precip_rate} mm/hr"),
        dew_point: format_temperature(&dew_point),
        condition,
        station: text(&stored.station, defaults::STATION),
        updated_label: format!("{UPDATED_PREFIX} {date} {time}"),
        updated_label_compact: format!("{UPDATED_PREFIX} {time}"),
        icon,
        is_daylight,
    }
}
