//! Precipitation reconciliation
//!
//! The live endpoint can under-report the station-day accumulation compared
//! to the hourly history. Merging takes the larger figure so a reported
//! value never goes backwards.

use domain::{HourlyPrecipSummary, Observation};

/// Merge the hourly maxima into the current observation
///
/// With no summary (hourly fetch failed or returned nothing for the day) the
/// observation passes through unchanged, unknown values included.
#[must_use]
pub fn reconcile(mut current: Observation, hourly: Option<HourlyPrecipSummary>) -> Observation {
    let Some(summary) = hourly else {
        return current;
    };

    current.precip_total_mm = Some(
        current
            .precip_total_mm
            .unwrap_or(0.0)
            .max(summary.max_precip_total_mm),
    );
    current.precip_rate_mm_per_hr = Some(
        current
            .precip_rate_mm_per_hr
            .unwrap_or(0.0)
            .max(summary.max_precip_rate_mm_per_hr),
    );
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: f64, rate: f64) -> HourlyPrecipSummary {
        HourlyPrecipSummary {
            max_precip_total_mm: total,
            max_precip_rate_mm_per_hr: rate,
        }
    }

    fn current(total: Option<f64>, rate: Option<f64>) -> Observation {
        Observation::default().with_precip(total, rate)
    }

    #[test]
    fn hourly_maximum_corrects_undercount() {
        let merged = reconcile(current(Some(1.0), Some(0.0)), Some(summary(3.2, 0.4)));
        assert_eq!(merged.precip_total_mm, Some(3.2));
        assert_eq!(merged.precip_rate_mm_per_hr, Some(0.4));
    }

    #[test]
    fn never_decreases_current_value() {
        let merged = reconcile(current(Some(5.0), Some(1.1)), Some(summary(2.0, 0.5)));
        assert_eq!(merged.precip_total_mm, Some(5.0));
        assert_eq!(merged.precip_rate_mm_per_hr, Some(1.1));
    }

    #[test]
    fn unknown_current_takes_hourly_value() {
        let merged = reconcile(current(None, None), Some(summary(0.8, 0.2)));
        assert_eq!(merged.precip_total_mm, Some(0.8));
        assert_eq!(merged.precip_rate_mm_per_hr, Some(0.2));
    }

    #[test]
    fn missing_summary_passes_through() {
        let obs = current(None, Some(0.3)).with_condition("Rain");
        let merged = reconcile(obs.clone(), None);
        assert_eq!(merged, obs);
    }
}
