//! Weather.com PWS client
//!
//! HTTP client for `/v2/pws/observations/current` and
//! `/v2/pws/history/hourly`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::models::{ObservationsResponse, PwsReading};

const CURRENT_PATH: &str = "/v2/pws/observations/current";
const HOURLY_PATH: &str = "/v2/pws/history/hourly";

/// PWS client errors
#[derive(Debug, Error)]
pub enum PwsError {
    /// API key or station id missing; no request was made
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// DNS, connect, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Non-success HTTP status
    #[error("Request failed with HTTP {status}")]
    Fetch {
        /// HTTP status code
        status: u16,
    },

    /// Body is not the expected JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// The response holds no observation rows
    #[error("No observations in response")]
    EmptyResult,
}

/// PWS client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PwsConfig {
    /// API base URL (default: <https://api.weather.com>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// TCP/TLS connect timeout in seconds (default: 8)
    #[serde(default = "default_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-read timeout in seconds (default: 8)
    #[serde(default = "default_timeout")]
    pub read_timeout_secs: u64,

    /// Unit system query value (default: `m`, metric)
    #[serde(default = "default_units")]
    pub units: String,
}

fn default_base_url() -> String {
    "https://api.weather.com".to_string()
}

const fn default_timeout() -> u64 {
    8
}

fn default_units() -> String {
    "m".to_string()
}

impl Default for PwsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_timeout(),
            read_timeout_secs: default_timeout(),
            units: default_units(),
        }
    }
}

/// PWS API operations
#[async_trait]
pub trait PwsApi: Send + Sync {
    /// Latest observation of a station
    async fn current(&self, api_key: &str, station_id: &str) -> Result<PwsReading, PwsError>;

    /// Hourly history of a station for one day
    async fn hourly(
        &self,
        api_key: &str,
        station_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<PwsReading>, PwsError>;
}

/// Weather.com PWS HTTP client
#[derive(Debug)]
pub struct PwsClient {
    client: Client,
    config: PwsConfig,
}

impl PwsClient {
    /// Create a new PWS client with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: PwsConfig) -> Result<Self, PwsError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .build()
            .map_err(|e| PwsError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, PwsError> {
        Self::new(PwsConfig::default())
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &PwsConfig {
        &self.config
    }

    fn validate_credentials(api_key: &str, station_id: &str) -> Result<(), PwsError> {
        if api_key.trim().is_empty() {
            return Err(PwsError::Configuration("apiKey is empty".to_string()));
        }
        if station_id.trim().is_empty() {
            return Err(PwsError::Configuration("stationId is empty".to_string()));
        }
        Ok(())
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Query parameters shared by both endpoints
    fn base_query(&self, api_key: &str, station_id: &str) -> Vec<(&'static str, String)> {
        vec![
            ("apiKey", api_key.to_string()),
            ("stationId", station_id.to_string()),
            ("format", "json".to_string()),
            ("units", self.config.units.clone()),
            ("numericPrecision", "decimal".to_string()),
        ]
    }

    /// Issue a GET and decode the observation envelope
    async fn get_observations(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<ObservationsResponse, PwsError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Requesting PWS observations");

        // URLs carry the API key; strip them from transport errors
        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| PwsError::Network(e.without_url().to_string()))?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Err(PwsError::EmptyResult);
        }
        if !status.is_success() {
            return Err(PwsError::Fetch {
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| PwsError::Network(e.without_url().to_string()))?;

        let parsed: ObservationsResponse =
            serde_json::from_slice(&body).map_err(|e| PwsError::Parse(e.to_string()))?;

        if parsed.observations.is_empty() {
            return Err(PwsError::EmptyResult);
        }
        Ok(parsed)
    }
}

#[async_trait]
impl PwsApi for PwsClient {
    #[instrument(skip(self, api_key))]
    async fn current(&self, api_key: &str, station_id: &str) -> Result<PwsReading, PwsError> {
        Self::validate_credentials(api_key, station_id)?;

        let query = self.base_query(api_key, station_id);
        let response = self.get_observations(CURRENT_PATH, &query).await?;

        // Non-empty: checked in get_observations
        let reading = response
            .observations
            .into_iter()
            .next()
            .map(PwsReading::from)
            .ok_or(PwsError::EmptyResult)?;

        debug!(
            temperature = ?reading.temperature_c,
            condition = %reading.condition,
            "Retrieved current observation"
        );
        Ok(reading)
    }

    #[instrument(skip(self, api_key))]
    async fn hourly(
        &self,
        api_key: &str,
        station_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<PwsReading>, PwsError> {
        Self::validate_credentials(api_key, station_id)?;

        let mut query = self.base_query(api_key, station_id);
        query.push(("date", date.format("%Y%m%d").to_string()));

        let response = self.get_observations(HOURLY_PATH, &query).await?;
        let readings: Vec<PwsReading> = response
            .observations
            .into_iter()
            .map(PwsReading::from)
            .collect();

        debug!(rows = readings.len(), "Retrieved hourly history");
        Ok(readings)
    }
}
