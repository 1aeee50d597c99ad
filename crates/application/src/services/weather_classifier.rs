//! Weather icon classification
//!
//! Two phases. First an ordered table of condition-text rules (English and
//! Spanish synonyms, case-insensitive substring match, first hit wins).
//! When no rule matches, numeric heuristics decide from precipitation rate,
//! temperature, dew point, humidity and wind.
//!
//! An unknown numeric field fails every comparison it takes part in.

use domain::{IconCategory, Observation};

/// Rain rate at or above which rain is heavy (mm/hr)
pub const HEAVY_RAIN_RATE: f64 = 2.5;
/// Rain rate at or above which rain is light rather than trace (mm/hr)
pub const LIGHT_RAIN_RATE: f64 = 0.2;
/// Temperature at or below which precipitation falls as snow (°C)
pub const SNOW_MAX_TEMP: f64 = 1.0;
/// Temperature at or below which precipitation may be sleet (°C)
pub const SLEET_MAX_TEMP: f64 = 2.0;
/// Dew point at or below which precipitation may be sleet (°C)
pub const SLEET_MAX_DEW_POINT: f64 = 0.5;
/// Humidity at or above which fog is possible (%)
pub const FOG_MIN_HUMIDITY: f64 = 95.0;
/// Maximum temperature/dew point spread for fog (°C)
pub const FOG_MAX_SPREAD: f64 = 1.5;
/// Wind speed at or above which it is windy (km/h)
pub const WINDY_MIN_SPEED: f64 = 35.0;
/// Humidity above which a quiet sky is shown as cloudy (%)
pub const CLOUDY_MIN_HUMIDITY: f64 = 55.0;

/// What a matched text rule resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
    /// Always this icon
    Fixed(IconCategory),
    /// Heavy, light or plain rain depending on the precipitation rate
    ByRainRate,
    /// Day or night variant
    ByDaylight {
        /// Icon while daylight
        day: IconCategory,
        /// Icon at night
        night: IconCategory,
    },
}

/// One row of the condition-text table
#[derive(Debug, Clone, Copy)]
pub struct TextRule {
    /// Lower-case substrings, any of which triggers the rule
    pub synonyms: &'static [&'static str],
    /// Result when the rule fires
    pub outcome: RuleOutcome,
}

impl TextRule {
    fn matches(&self, condition_lower: &str) -> bool {
        self.synonyms.iter().any(|s| condition_lower.contains(s))
    }
}

/// Condition-text rules, in evaluation order
pub static RULES: [TextRule; 16] = [
    TextRule {
        synonyms: &["thunder", "storm", "tormenta"],
        outcome: RuleOutcome::Fixed(IconCategory::Thunder),
    },
    TextRule {
        synonyms: &["hail", "granizo", "ice pellets"],
        outcome: RuleOutcome::Fixed(IconCategory::Hail),
    },
    TextRule {
        synonyms: &["freezing rain", "lluvia helada"],
        outcome: RuleOutcome::Fixed(IconCategory::FreezingRain),
    },
    TextRule {
        synonyms: &["sleet", "aguanieve", "ice rain"],
        outcome: RuleOutcome::Fixed(IconCategory::Sleet),
    },
    TextRule {
        synonyms: &["blizzard", "ventisca"],
        outcome: RuleOutcome::Fixed(IconCategory::Blizzard),
    },
    TextRule {
        synonyms: &["blowing snow", "nieve soplada"],
        outcome: RuleOutcome::Fixed(IconCategory::BlowingSnow),
    },
    TextRule {
        synonyms: &["snow", "nieve", "flurr"],
        outcome: RuleOutcome::Fixed(IconCategory::Snow),
    },
    TextRule {
        synonyms: &["fog", "mist", "niebla", "bruma"],
        outcome: RuleOutcome::Fixed(IconCategory::Fog),
    },
    TextRule {
        synonyms: &["haze", "hazy", "calima"],
        outcome: RuleOutcome::Fixed(IconCategory::Haze),
    },
    TextRule {
        synonyms: &["very hot", "muy caluroso", "muy calor"],
        outcome: RuleOutcome::Fixed(IconCategory::Hot),
    },
    TextRule {
        synonyms: &["very cold", "muy frio", "muy frío"],
        outcome: RuleOutcome::Fixed(IconCategory::Cold),
    },
    TextRule {
        synonyms: &["drizzle", "llovizna"],
        outcome: RuleOutcome::Fixed(IconCategory::RainLight),
    },
    TextRule {
        synonyms: &["rain", "shower", "lluv", "chubasco"],
        outcome: RuleOutcome::ByRainRate,
    },
    TextRule {
        synonyms: &["partly", "parcial", "few clouds", "scattered", "nubes y sol"],
        outcome: RuleOutcome::ByDaylight {
            day: IconCategory::PartlyCloudyDay,
            night: IconCategory::PartlyCloudyNight,
        },
    },
    TextRule {
        synonyms: &["cloud", "nub", "overcast", "cubierto"],
        outcome: RuleOutcome::Fixed(IconCategory::Cloudy),
    },
    TextRule {
        synonyms: &["clear", "despej", "sunny", "sol", "fair"],
        outcome: RuleOutcome::ByDaylight {
            day: IconCategory::Sunny,
            night: IconCategory::Moon,
        },
    },
];

/// Everything the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierInput<'a> {
    pub condition: &'a str,
    pub temperature_c: Option<f64>,
    pub dew_point_c: Option<f64>,
    pub precip_rate_mm_per_hr: Option<f64>,
    pub wind_speed_kmh: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub is_daylight: bool,
}

impl<'a> ClassifierInput<'a> {
    /// Take the relevant fields of an observation
    #[must_use]
    pub fn from_observation(observation: &'a Observation, is_daylight: bool) -> Self {
        Self {
            condition: &observation.condition,
            temperature_c: observation.temperature_c,
            dew_point_c: observation.dew_point_c,
            precip_rate_mm_per_hr: observation.precip_rate_mm_per_hr,
            wind_speed_kmh: observation.wind_speed_kmh,
            humidity_pct: observation.humidity_pct,
            is_daylight,
        }
    }
}

/// First text rule matching the condition phrase
#[must_use]
pub fn match_text_rule(condition: &str) -> Option<&'static TextRule> {
    let lower = condition.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&lower))
}

/// Pick the icon for an observation
#[must_use]
pub fn classify(input: &ClassifierInput<'_>) -> IconCategory {
    match match_text_rule(input.condition) {
        Some(rule) => resolve_outcome(rule.outcome, input),
        None => classify_numeric(input),
    }
}

fn resolve_outcome(outcome: RuleOutcome, input: &ClassifierInput<'_>) -> IconCategory {
    match outcome {
        RuleOutcome::Fixed(icon) => icon,
        RuleOutcome::ByRainRate => {
            if at_least(input.precip_rate_mm_per_hr, HEAVY_RAIN_RATE) {
                IconCategory::RainHeavy
            } else if at_least(input.precip_rate_mm_per_hr, LIGHT_RAIN_RATE) {
                IconCategory::RainLight
            } else {
                IconCategory::Rain
            }
        }
        RuleOutcome::ByDaylight { day, night } => {
            if input.is_daylight {
                day
            } else {
                night
            }
        }
    }
}

fn classify_numeric(input: &ClassifierInput<'_>) -> IconCategory {
    let rate = input.precip_rate_mm_per_hr;
    let temp = input.temperature_c;
    let dew = input.dew_point_c;

    if at_least(rate, HEAVY_RAIN_RATE) {
        return IconCategory::RainHeavy;
    }
    if at_least(rate, LIGHT_RAIN_RATE) {
        if at_most(temp, SNOW_MAX_TEMP) {
            return IconCategory::Snow;
        }
        if at_most(temp, SLEET_MAX_TEMP) && at_most(dew, SLEET_MAX_DEW_POINT) {
            return IconCategory::Sleet;
        }
        return IconCategory::RainLight;
    }

    let spread = temp.zip(dew).map(|(t, d)| (t - d).abs());
    if at_least(input.humidity_pct, FOG_MIN_HUMIDITY) && at_most(spread, FOG_MAX_SPREAD) {
        return IconCategory::Fog;
    }
    if at_least(input.wind_speed_kmh, WINDY_MIN_SPEED) {
        return IconCategory::Windy;
    }

    if input.humidity_pct.is_some_and(|h| h > CLOUDY_MIN_HUMIDITY) {
        IconCategory::Cloudy
    } else if input.is_daylight {
        IconCategory::Sunny
    } else {
        IconCategory::Moon
    }
}

fn at_least(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v >= threshold)
}

fn at_most(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v <= threshold)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(condition: &str) -> ClassifierInput<'_> {
        ClassifierInput {
            condition,
            temperature_c: None,
            dew_point_c: None,
            precip_rate_mm_per_hr: None,
            wind_speed_kmh: None,
            humidity_pct: None,
            is_daylight: true,
        }
    }

    fn rain_at(rate: f64) -> IconCategory {
        classify(&ClassifierInput {
            precip_rate_mm_per_hr: Some(rate),
            ..input("Light Rain")
        })
    }

    // ── Text rules ──────────────────────────────────────────────

    #[test]
    fn rule_table_row_by_row() {
        let cases = [
            ("Thunderstorm", IconCategory::Thunder),
            ("Hail", IconCategory::Hail),
            ("Freezing Rain", IconCategory::FreezingRain),
            ("Sleet", IconCategory::Sleet),
            ("Blizzard", IconCategory::Blizzard),
            ("Blowing Snow", IconCategory::BlowingSnow),
            ("Light Snow", IconCategory::Snow),
            ("Mist", IconCategory::Fog),
            ("Haze", IconCategory::Haze),
            ("Very Hot", IconCategory::Hot),
            ("Very Cold", IconCategory::Cold),
            ("Drizzle", IconCategory::RainLight),
            ("Showers", IconCategory::Rain),
            ("Partly Cloudy", IconCategory::PartlyCloudyDay),
            ("Mostly Cloudy", IconCategory::Cloudy),
            ("Fair", IconCategory::Sunny),
        ];
        for (condition, expected) in cases {
            assert_eq!(classify(&input(condition)), expected, "condition {condition}");
        }
    }

    #[test]
    fn spanish_synonyms() {
        assert_eq!(classify(&input("Tormenta eléctrica")), IconCategory::Thunder);
        assert_eq!(classify(&input("Granizo")), IconCategory::Hail);
        assert_eq!(classify(&input("Lluvia helada")), IconCategory::FreezingRain);
        assert_eq!(classify(&input("Aguanieve")), IconCategory::Sleet);
        assert_eq!(classify(&input("Nieve")), IconCategory::Snow);
        assert_eq!(classify(&input("Niebla")), IconCategory::Fog);
        assert_eq!(classify(&input("Muy frío")), IconCategory::Cold);
        assert_eq!(classify(&input("Llovizna")), IconCategory::RainLight);
        assert_eq!(classify(&input("Chubascos")), IconCategory::Rain);
        assert_eq!(classify(&input("Nubes y sol")), IconCategory::PartlyCloudyDay);
        assert_eq!(classify(&input("Cubierto")), IconCategory::Cloudy);
        assert_eq!(classify(&input("Despejado")), IconCategory::Sunny);
    }

    #[test]
    fn thunder_wins_regardless_of_case_and_numbers() {
        for condition in ["THUNDER", "thunder", "Thunder and rain", "tHuNdEr"] {
            let icon = classify(&ClassifierInput {
                precip_rate_mm_per_hr: Some(10.0),
                wind_speed_kmh: Some(80.0),
                humidity_pct: Some(100.0),
                temperature_c: Some(-5.0),
                dew_point_c: Some(-5.0),
                ..input(condition)
            });
            assert_eq!(icon, IconCategory::Thunder);
        }
    }

    #[test]
    fn earlier_rule_wins() {
        // contains both "freezing rain" and "rain"
        assert_eq!(classify(&input("Freezing Rain")), IconCategory::FreezingRain);
        // "blowing snow" precedes "snow"
        assert_eq!(classify(&input("Blowing Snow")), IconCategory::BlowingSnow);
        // "partly cloudy" precedes "cloud"
        assert_eq!(classify(&input("partly cloudy")), IconCategory::PartlyCloudyDay);
    }

    #[test]
    fn rain_rate_boundaries() {
        assert_eq!(rain_at(2.5), IconCategory::RainHeavy);
        assert_eq!(rain_at(2.4999), IconCategory::RainLight);
        assert_eq!(rain_at(0.2), IconCategory::RainLight);
        assert_eq!(rain_at(0.1999), IconCategory::Rain);
    }

    #[test]
    fn rain_with_unknown_rate_is_plain_rain() {
        assert_eq!(classify(&input("Rain")), IconCategory::Rain);
    }

    #[test]
    fn night_variants_from_text() {
        let night = |c| {
            classify(&ClassifierInput {
                is_daylight: false,
                ..input(c)
            })
        };
        assert_eq!(night("Partly Cloudy"), IconCategory::PartlyCloudyNight);
        assert_eq!(night("Clear"), IconCategory::Moon);
        assert_eq!(night("Cloudy"), IconCategory::Cloudy);
    }

    // ── Numeric fallback ────────────────────────────────────────

    #[test]
    fn numeric_heavy_rain() {
        let icon = classify(&ClassifierInput {
            precip_rate_mm_per_hr: Some(2.5),
            temperature_c: Some(-3.0),
            ..input("")
        });
        assert_eq!(icon, IconCategory::RainHeavy);
    }

    #[test]
    fn numeric_snow_and_sleet_edges() {
        let precip = |temp: f64, dew: f64| {
            classify(&ClassifierInput {
                precip_rate_mm_per_hr: Some(0.2),
                temperature_c: Some(temp),
                dew_point_c: Some(dew),
                ..input("")
            })
        };
        assert_eq!(precip(1.0, 5.0), IconCategory::Snow);
        assert_eq!(precip(1.01, 0.5), IconCategory::Sleet);
        assert_eq!(precip(2.0, 0.5), IconCategory::Sleet);
        assert_eq!(precip(2.0, 0.51), IconCategory::RainLight);
        assert_eq!(precip(2.01, 0.0), IconCategory::RainLight);
    }

    #[test]
    fn numeric_precip_with_unknown_temperature_is_light_rain() {
        let icon = classify(&ClassifierInput {
            precip_rate_mm_per_hr: Some(0.5),
            ..input("")
        });
        assert_eq!(icon, IconCategory::RainLight);
    }

    #[test]
    fn numeric_fog_boundaries() {
        let fog = |humidity: f64, temp: f64, dew: f64| {
            classify(&ClassifierInput {
                humidity_pct: Some(humidity),
                temperature_c: Some(temp),
                dew_point_c: Some(dew),
                ..input("")
            })
        };
        assert_eq!(fog(95.0, 10.0, 8.5), IconCategory::Fog);
        assert_eq!(fog(94.9, 10.0, 8.5), IconCategory::Cloudy);
        assert_eq!(fog(99.0, 10.0, 8.4), IconCategory::Cloudy);
    }

    #[test]
    fn numeric_fog_needs_both_temperatures() {
        let icon = classify(&ClassifierInput {
            humidity_pct: Some(99.0),
            temperature_c: Some(10.0),
            ..input("")
        });
        assert_eq!(icon, IconCategory::Cloudy);
    }

    #[test]
    fn numeric_wind_boundary() {
        let windy = |speed: f64| {
            classify(&ClassifierInput {
                wind_speed_kmh: Some(speed),
                ..input("")
            })
        };
        assert_eq!(windy(35.0), IconCategory::Windy);
        assert_eq!(windy(34.9), IconCategory::Sunny);
    }

    #[test]
    fn numeric_humidity_boundary() {
        let humid = |humidity: f64, is_daylight: bool| {
            classify(&ClassifierInput {
                humidity_pct: Some(humidity),
                is_daylight,
                ..input("")
            })
        };
        assert_eq!(humid(55.0, true), IconCategory::Sunny);
        assert_eq!(humid(55.0, false), IconCategory::Moon);
        assert_eq!(humid(55.1, true), IconCategory::Cloudy);
    }

    #[test]
    fn all_unknown_falls_to_daylight_default() {
        assert_eq!(classify(&input("")), IconCategory::Sunny);
        assert_eq!(
            classify(&ClassifierInput {
                is_daylight: false,
                ..input("unrecognised phrase")
            }),
            IconCategory::Moon
        );
    }

    #[test]
    fn from_observation_copies_fields() {
        let mut obs = Observation::default().with_condition("Fog");
        obs.humidity_pct = Some(97.0);
        let input = ClassifierInput::from_observation(&obs, false);
        assert_eq!(input.condition, "Fog");
        assert_eq!(input.humidity_pct, Some(97.0));
        assert!(!input.is_daylight);
    }
}
