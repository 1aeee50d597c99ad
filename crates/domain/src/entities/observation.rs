//! Observation entity - One reading fetched from a personal weather station

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Timezone;

/// A single station reading
///
/// Every numeric field is optional: a value the provider did not send stays
/// `None` ("unknown") and is never coerced to zero here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Human-readable station name (neighborhood or station id)
    pub station_name: Option<String>,
    /// Free-text condition phrase, possibly empty
    pub condition: String,
    /// Provider icon code
    pub condition_code: Option<i32>,
    /// Air temperature in °C
    pub temperature_c: Option<f64>,
    /// Dew point in °C
    pub dew_point_c: Option<f64>,
    /// Relative humidity in percent
    pub humidity_pct: Option<f64>,
    /// Wind speed in km/h
    pub wind_speed_kmh: Option<f64>,
    /// Wind bearing in degrees
    pub wind_direction_deg: Option<f64>,
    /// Station pressure in hPa
    pub pressure_hpa: Option<f64>,
    /// Accumulated precipitation for the station-day in mm
    pub precip_total_mm: Option<f64>,
    /// Precipitation rate in mm/hr
    pub precip_rate_mm_per_hr: Option<f64>,
    /// Explicit daylight flag, when the provider sends one
    pub is_daylight: Option<bool>,
    /// Observation instant
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    /// An observation with every field unknown
    #[must_use]
    pub fn unknown_at(observed_at: DateTime<Utc>) -> Self {
        Self {
            observed_at,
            ..Self::default()
        }
    }

    /// Set the condition phrase
    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Set the precipitation figures
    #[must_use]
    pub const fn with_precip(mut self, total_mm: Option<f64>, rate_mm_per_hr: Option<f64>) -> Self {
        self.precip_total_mm = total_mm;
        self.precip_rate_mm_per_hr = rate_mm_per_hr;
        self
    }

    /// Whether the observation falls on `date` in station-local time
    #[must_use]
    pub fn is_on_local_date(&self, date: NaiveDate, timezone: &Timezone) -> bool {
        timezone.local_date(self.observed_at) == date
    }
}

/// Maximum precipitation seen in the same-day hourly history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HourlyPrecipSummary {
    /// Largest accumulated total across the hourly rows, in mm
    pub max_precip_total_mm: f64,
    /// Largest rate across the hourly rows, in mm/hr
    pub max_precip_rate_mm_per_hr: f64,
}

impl HourlyPrecipSummary {
    /// Summarise hourly rows
    ///
    /// Unknown values are skipped. Returns `None` when there are no rows at all.
    #[must_use]
    pub fn from_observations<'a, I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Observation>,
    {
        let mut seen = false;
        let mut summary = Self {
            max_precip_total_mm: 0.0,
            max_precip_rate_mm_per_hr: 0.0,
        };

        for row in rows {
            seen = true;
            if let Some(total) = row.precip_total_mm.filter(|v| v.is_finite()) {
                summary.max_precip_total_mm = summary.max_precip_total_mm.max(total);
            }
            if let Some(rate) = row.precip_rate_mm_per_hr.filter(|v| v.is_finite()) {
                summary.max_precip_rate_mm_per_hr = summary.max_precip_rate_mm_per_hr.max(rate);
            }
        }

        seen.then_some(summary)
    }

    /// Summarise only the rows recorded on `date` in station-local time
    #[must_use]
    pub fn for_local_date(rows: &[Observation], date: NaiveDate, timezone: &Timezone) -> Option<Self> {
        Self::from_observations(rows.iter().filter(|row| row.is_on_local_date(date, timezone)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap()
    }

    #[test]
    fn unknown_observation_has_no_values() {
        let obs = Observation::unknown_at(at(12));
        assert!(obs.condition.is_empty());
        assert!(obs.temperature_c.is_none());
        assert!(obs.precip_total_mm.is_none());
        assert_eq!(obs.observed_at, at(12));
    }

    #[test]
    fn summary_of_empty_rows_is_none() {
        assert!(HourlyPrecipSummary::from_observations(&[]).is_none());
    }

    #[test]
    fn summary_takes_maximum() {
        let rows = vec![
            Observation::unknown_at(at(1)).with_precip(Some(0.4), Some(0.1)),
            Observation::unknown_at(at(2)).with_precip(Some(3.2), Some(2.0)),
            Observation::unknown_at(at(3)).with_precip(Some(2.8), Some(0.0)),
        ];
        let summary = HourlyPrecipSummary::from_observations(&rows).unwrap();
        assert!((summary.max_precip_total_mm - 3.2).abs() < f64::EPSILON);
        assert!((summary.max_precip_rate_mm_per_hr - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_skips_unknown_values() {
        let rows = vec![
            Observation::unknown_at(at(1)),
            Observation::unknown_at(at(2)).with_precip(None, Some(f64::NAN)),
        ];
        let summary = HourlyPrecipSummary::from_observations(&rows).unwrap();
        assert!(summary.max_precip_total_mm.abs() < f64::EPSILON);
        assert!(summary.max_precip_rate_mm_per_hr.abs() < f64::EPSILON);
    }

    #[test]
    fn local_date_filter_drops_other_days() {
        let yesterday = Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap();
        let rows = vec![
            Observation::unknown_at(yesterday).with_precip(Some(9.9), Some(5.0)),
            Observation::unknown_at(at(8)).with_precip(Some(1.5), Some(0.3)),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let summary = HourlyPrecipSummary::for_local_date(&rows, date, &Timezone::utc()).unwrap();
        assert!((summary.max_precip_total_mm - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn local_date_filter_respects_station_zone() {
        // 23:00 UTC on the 9th is already the 10th in Madrid (summer time)
        let late = Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap();
        let rows = vec![Observation::unknown_at(late).with_precip(Some(4.0), None)];
        let date = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        let madrid = Timezone::parse("Europe/Madrid").unwrap();
        assert!(HourlyPrecipSummary::for_local_date(&rows, date, &madrid).is_some());
        assert!(HourlyPrecipSummary::for_local_date(&rows, date, &Timezone::utc()).is_none());
    }
}
