//! Weather icon category value object
//!
//! The discrete set of icons a widget can paint. The persisted form is the
//! snake_case name returned by [`IconCategory::as_str`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Discrete weather icon category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconCategory {
    /// Thunderstorm
    Thunder,
    /// Hail or ice pellets
    Hail,
    /// Freezing rain
    FreezingRain,
    /// Sleet / mixed precipitation
    Sleet,
    /// Blizzard
    Blizzard,
    /// Blowing snow
    BlowingSnow,
    /// Snow or flurries
    Snow,
    /// Fog or mist
    Fog,
    /// Haze
    Haze,
    /// Very hot
    Hot,
    /// Very cold
    Cold,
    /// Light rain or drizzle
    RainLight,
    /// Rain without a measurable rate
    Rain,
    /// Heavy rain
    RainHeavy,
    /// Partly cloudy during the day
    #[serde(rename = "partly_cloudy")]
    PartlyCloudyDay,
    /// Partly cloudy at night
    PartlyCloudyNight,
    /// Cloudy or overcast
    Cloudy,
    /// Clear sky during the day
    Sunny,
    /// Clear sky at night
    Moon,
    /// Strong wind
    Windy,
}

impl IconCategory {
    /// Every category, in declaration order
    pub const ALL: [Self; 20] = [
        Self::Thunder,
        Self::Hail,
        Self::FreezingRain,
        Self::Sleet,
        Self::Blizzard,
        Self::BlowingSnow,
        Self::Snow,
        Self::Fog,
        Self::Haze,
        Self::Hot,
        Self::Cold,
        Self::RainLight,
        Self::Rain,
        Self::RainHeavy,
        Self::PartlyCloudyDay,
        Self::PartlyCloudyNight,
        Self::Cloudy,
        Self::Sunny,
        Self::Moon,
        Self::Windy,
    ];

    /// Stable identifier used in the preference store
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thunder => "thunder",
            Self::Hail => "hail",
            Self::FreezingRain => "freezing_rain",
            Self::Sleet => "sleet",
            Self::Blizzard => "blizzard",
            Self::BlowingSnow => "blowing_snow",
            Self::Snow => "snow",
            Self::Fog => "fog",
            Self::Haze => "haze",
            Self::Hot => "hot",
            Self::Cold => "cold",
            Self::RainLight => "rain_light",
            Self::Rain => "rain",
            Self::RainHeavy => "rain_heavy",
            Self::PartlyCloudyDay => "partly_cloudy",
            Self::PartlyCloudyNight => "partly_cloudy_night",
            Self::Cloudy => "cloudy",
            Self::Sunny => "sunny",
            Self::Moon => "moon",
            Self::Windy => "windy",
        }
    }

    /// Drawable resource name the renderer maps this category to
    #[must_use]
    pub fn resource_name(&self) -> String {
        format!("ic_{}", self.as_str())
    }

    /// Get an emoji representation
    #[must_use]
    pub const fn emoji(&self) -> &'static str {
        match self {
            Self::Thunder => "⛈️",
            Self::Hail | Self::FreezingRain | Self::Sleet => "🌨️",
            Self::Blizzard | Self::BlowingSnow | Self::Snow => "❄️",
            Self::Fog | Self::Haze => "🌫️",
            Self::Hot => "🥵",
            Self::Cold => "🥶",
            Self::RainLight | Self::Rain | Self::RainHeavy => "🌧️",
            Self::PartlyCloudyDay => "⛅",
            Self::PartlyCloudyNight | Self::Cloudy => "☁️",
            Self::Sunny => "☀️",
            Self::Moon => "🌙",
            Self::Windy => "💨",
        }
    }

    /// Whether the icon depends on the time of day
    #[must_use]
    pub const fn is_night_variant(&self) -> bool {
        matches!(self, Self::Moon | Self::PartlyCloudyNight)
    }
}

impl fmt::Display for IconCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IconCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == needle)
            .ok_or_else(|| DomainError::ValidationError(format!("unknown icon category: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn as_str_round_trips_through_from_str() {
        for category in IconCategory::ALL {
            assert_eq!(category.as_str().parse::<IconCategory>().ok(), Some(category));
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("RAIN_HEAVY".parse::<IconCategory>().ok(), Some(IconCategory::RainHeavy));
        assert_eq!(" moon ".parse::<IconCategory>().ok(), Some(IconCategory::Moon));
    }

    #[test]
    fn from_str_rejects_unknown() {
        assert!("tornado".parse::<IconCategory>().is_err());
    }

    #[test]
    fn resource_name_has_prefix() {
        assert_eq!(IconCategory::Thunder.resource_name(), "ic_thunder");
        assert_eq!(IconCategory::PartlyCloudyNight.resource_name(), "ic_partly_cloudy_night");
    }

    #[test]
    fn night_variants() {
        assert!(IconCategory::Moon.is_night_variant());
        assert!(IconCategory::PartlyCloudyNight.is_night_variant());
        assert!(!IconCategory::Sunny.is_night_variant());
    }

    #[test]
    fn serialization_uses_snake_case() {
        let json = serde_json::to_string(&IconCategory::FreezingRain).expect("serialize");
        assert_eq!(json, "\"freezing_rain\"");
    }
}
