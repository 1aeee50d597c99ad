//! 16-point compass rose
//!
//! Converts a wind bearing in degrees into the nearest of sixteen compass
//! points (N, NNE, NE, ... NNW).

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the sixteen compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    /// Clockwise from north, one entry every 22.5°
    pub const ROSE: [Self; 16] = [
        Self::N,
        Self::Nne,
        Self::Ne,
        Self::Ene,
        Self::E,
        Self::Ese,
        Self::Se,
        Self::Sse,
        Self::S,
        Self::Ssw,
        Self::Sw,
        Self::Wsw,
        Self::W,
        Self::Wnw,
        Self::Nw,
        Self::Nnw,
    ];

    /// Angular width of one compass sector in degrees
    pub const SECTOR_DEGREES: f64 = 22.5;

    /// Nearest compass point for a bearing in degrees
    ///
    /// The bearing is normalised into `[0, 360)` first, so negative and
    /// over-range values wrap around. Returns `None` for NaN or infinite input.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_bearing(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let normalized = degrees.rem_euclid(360.0);
        // normalized / 22.5 is in [0, 16), so the rounded index is in [0, 16]
        let index = (normalized / Self::SECTOR_DEGREES).round() as usize % Self::ROSE.len();
        Some(Self::ROSE[index])
    }

    /// Parse bearing text (`"225"`, `"11,25"`) and map it to a compass point
    #[must_use]
    pub fn from_bearing_text(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .and_then(Self::from_bearing)
    }

    /// Short uppercase label, e.g. `"NNE"`
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::N => "N",
            Self::Nne => "NNE",
            Self::Ne => "NE",
            Self::Ene => "ENE",
            Self::E => "E",
            Self::Ese => "ESE",
            Self::Se => "SE",
            Self::Sse => "SSE",
            Self::S => "S",
            Self::Ssw => "SSW",
            Self::Sw => "SW",
            Self::Wsw => "WSW",
            Self::W => "W",
            Self::Wnw => "WNW",
            Self::Nw => "NW",
            Self::Nnw => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
