//! Station credentials value object
//!
//! The API key and station identifier required to query a personal
//! weather station. Both must be present and non-blank.

use std::fmt;

use crate::errors::DomainError;

/// Validated API key + station identifier pair
#[derive(Clone, PartialEq, Eq)]
pub struct StationCredentials {
    api_key: String,
    station_id: String,
}

impl StationCredentials {
    /// Create credentials from raw values
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingCredential` if either value is blank.
    pub fn new(api_key: impl AsRef<str>, station_id: impl AsRef<str>) -> Result<Self, DomainError> {
        let api_key = api_key.as_ref().trim();
        let station_id = station_id.as_ref().trim();

        if api_key.is_empty() {
            return Err(DomainError::MissingCredential("apiKey"));
        }
        if station_id.is_empty() {
            return Err(DomainError::MissingCredential("stationId"));
        }

        Ok(Self {
            api_key: api_key.to_string(),
            station_id: station_id.to_string(),
        })
    }

    /// Build credentials from optional store lookups
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingCredential` if either value is absent or blank.
    pub fn from_optional(
        api_key: Option<String>,
        station_id: Option<String>,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.ok_or(DomainError::MissingCredential("apiKey"))?;
        let station_id = station_id.ok_or(DomainError::MissingCredential("stationId"))?;
        Self::new(api_key, station_id)
    }

    /// The provider API key
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The station identifier
    #[must_use]
    pub fn station_id(&self) -> &str {
        &self.station_id
    }
}

impl fmt::Debug for StationCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StationCredentials")
            .field("api_key", &"[REDACTED]")
            .field("station_id", &self.station_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_credentials() {
        let creds = StationCredentials::new(" key ", "IMADRID123").unwrap();
        assert_eq!(creds.api_key(), "key");
        assert_eq!(creds.station_id(), "IMADRID123");
    }

    #[test]
    fn blank_api_key_rejected() {
        let err = StationCredentials::new("  ", "IMADRID123").unwrap_err();
        assert!(matches!(err, DomainError::MissingCredential("apiKey")));
    }

    #[test]
    fn blank_station_rejected() {
        let err = StationCredentials::new("key", "").unwrap_err();
        assert!(matches!(err, DomainError::MissingCredential("stationId")));
    }

    #[test]
    fn from_optional_requires_both() {
        assert!(StationCredentials::from_optional(None, Some("S".into())).is_err());
        assert!(StationCredentials::from_optional(Some("K".into()), None).is_err());
        assert!(StationCredentials::from_optional(Some("K".into()), Some("S".into())).is_ok());
    }

    #[test]
    fn debug_redacts_api_key() {
        let creds = StationCredentials::new("super-secret", "IMADRID123").unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("IMADRID123"));
    }
}
