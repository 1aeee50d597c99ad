//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::entities::{HourlyPrecipSummary, Observation};
use domain::value_objects::{CompassPoint, StationCredentials};
use proptest::prelude::*;

// ============================================================================
// CompassPoint Property Tests
// ============================================================================

mod compass_point_tests {
    use super::*;

    proptest! {
        #[test]
        fn finite_bearing_always_has_a_label(deg in -10_000.0f64..10_000.0f64) {
            prop_assert!(CompassPoint::from_bearing(deg).is_some());
        }

        #[test]
        fn full_turns_do_not_change_label(deg in 0.0f64..360.0f64, turns in -5i32..5i32) {
            let shifted = f64::from(turns).mul_add(360.0, deg);
            // Exact half-sector boundaries may round differently after float drift
            let sector = deg / CompassPoint::SECTOR_DEGREES;
            prop_assume!((sector - sector.trunc() - 0.5).abs() > 1e-6);
            prop_assert_eq!(CompassPoint::from_bearing(deg), CompassPoint::from_bearing(shifted));
        }

        #[test]
        fn comma_and_dot_decimals_agree(whole in 0u32..360u32, frac in 0u32..10u32) {
            let dot = format!("{whole}.{frac}");
            let comma = format!("{whole},{frac}");
            prop_assert_eq!(
                CompassPoint::from_bearing_text(&dot),
                CompassPoint::from_bearing_text(&comma)
            );
        }

        #[test]
        fn alphabetic_text_has_no_label(text in "[a-zA-Z]{1,12}") {
            // "inf" and "nan" parse as floats but are not finite
            prop_assert!(CompassPoint::from_bearing_text(&text).is_none());
        }
    }
}

// ============================================================================
// StationCredentials Property Tests
// ============================================================================

mod credentials_tests {
    use super::*;

    proptest! {
        #[test]
        fn whitespace_only_values_rejected(blank in "[ \t]{0,8}", other in "[A-Za-z0-9]{1,16}") {
            prop_assert!(StationCredentials::new(&blank, &other).is_err());
            prop_assert!(StationCredentials::new(&other, &blank).is_err());
        }

        #[test]
        fn debug_never_leaks_key(key in "[a-f0-9]{16,32}", station in "[A-Z0-9]{4,12}") {
            let creds = StationCredentials::new(&key, &station).unwrap();
            let debug = format!("{creds:?}");
            prop_assert!(!debug.contains(&key));
        }
    }
}

// ============================================================================
// HourlyPrecipSummary Property Tests
// ============================================================================

mod hourly_summary_tests {
    use super::*;

    proptest! {
        #[test]
        fn summary_dominates_every_row(
            values in prop::collection::vec((0.0f64..200.0, 0.0f64..50.0), 1..24)
        ) {
            let rows: Vec<Observation> = values
                .iter()
                .map(|(total, rate)| Observation::default().with_precip(Some(*total), Some(*rate)))
                .collect();
            let summary = HourlyPrecipSummary::from_observations(&rows).unwrap();
            for (total, rate) in &values {
                prop_assert!(summary.max_precip_total_mm >= *total);
                prop_assert!(summary.max_precip_rate_mm_per_hr >= *rate);
            }
        }
    }
}
