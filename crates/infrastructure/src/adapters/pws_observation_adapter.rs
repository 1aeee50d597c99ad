//! PWS observation adapter - Implements ObservationPort using integration_pws

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::ObservationPort;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{Observation, StationCredentials};
use integration_pws::{PwsApi, PwsClient, PwsConfig, PwsError, PwsReading};
use tracing::{debug, instrument};

/// Adapter for the Weather.com personal weather station API
pub struct PwsObservationAdapter {
    api: Arc<dyn PwsApi>,
}

impl std::fmt::Debug for PwsObservationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PwsObservationAdapter")
            .field("api", &"PwsApi")
            .finish()
    }
}

impl PwsObservationAdapter {
    /// Create an adapter over a new HTTP client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: PwsConfig) -> Result<Self, ApplicationError> {
        let client = PwsClient::new(config).map_err(Self::map_error)?;
        Ok(Self::from_api(Arc::new(client)))
    }

    /// Create an adapter over any PWS API implementation
    #[must_use]
    pub fn from_api(api: Arc<dyn PwsApi>) -> Self {
        Self { api }
    }

    /// Map integration PWS error to application error
    fn map_error(err: PwsError) -> ApplicationError {
        match err {
            PwsError::Configuration(e) => ApplicationError::Configuration(e),
            PwsError::Network(e) => ApplicationError::Network(e),
            PwsError::Fetch { status } => ApplicationError::Fetch { status },
            PwsError::Parse(e) => ApplicationError::Parse(e),
            PwsError::EmptyResult => ApplicationError::EmptyResult,
        }
    }

    /// Convert a reading; rows without a timestamp are stamped `now`
    fn to_observation(reading: PwsReading, now: DateTime<Utc>) -> Observation {
        Observation {
            station_name: reading.station_name().map(str::to_string),
            condition: reading.condition,
            condition_code: reading.icon_code,
            temperature_c: reading.temperature_c,
            dew_point_c: reading.dew_point_c,
            humidity_pct: reading.humidity_pct,
            wind_speed_kmh: reading.wind_speed_kmh,
            wind_direction_deg: reading.wind_direction_deg,
            pressure_hpa: reading.pressure_hpa,
            precip_total_mm: reading.precip_total_mm,
            precip_rate_mm_per_hr: reading.precip_rate_mm_per_hr,
            is_daylight: reading.is_daylight,
            observed_at: reading.observed_at.unwrap_or(now),
        }
    }
}

#[async_trait]
impl ObservationPort for PwsObservationAdapter {
    #[instrument(skip(self, credentials), fields(station_id = credentials.station_id()))]
    async fn fetch_current(
        &self,
        credentials: &StationCredentials,
        now: DateTime<Utc>,
    ) -> Result<Observation, ApplicationError> {
        let reading = self
            .api
            .current(credentials.api_key(), credentials.station_id())
            .await
            .map_err(Self::map_error)?;

        let observation = Self::to_observation(reading, now);
        debug!(observed_at = %observation.observed_at, "Current observation fetched");
        Ok(observation)
    }

    #[instrument(skip(self, credentials), fields(station_id = credentials.station_id()))]
    async fn fetch_today_hourly(
        &self,
        credentials: &StationCredentials,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<Observation>, ApplicationError> {
        let readings = self
            .api
            .hourly(credentials.api_key(), credentials.station_id(), date)
            .await
            .map_err(Self::map_error)?;

        let rows: Vec<Observation> = readings
            .into_iter()
            .map(|reading| Self::to_observation(reading, now))
            .collect();
        debug!(rows = rows.len(), "Hourly history fetched");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockall::{mock, predicate::eq};

    use super::*;

    mock! {
        Api {}

        #[async_trait]
        impl PwsApi for Api {
            async fn current(&self, api_key: &str, station_id: &str) -> Result<PwsReading, PwsError>;
            async fn hourly(
                &self,
                api_key: &str,
                station_id: &str,
                date: NaiveDate,
            ) -> Result<Vec<PwsReading>, PwsError>;
        }
    }

    fn cycle_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 14, 15, 30, 0).unwrap()
    }

    fn credentials() -> StationCredentials {
        StationCredentials::new("secret", "IMADRI1").unwrap()
    }

    fn reading() -> PwsReading {
        PwsReading {
            station_id: Some("IMADRI1".into()),
            neighborhood: Some("Chamberí".into()),
            condition: "Light Rain".into(),
            icon_code: Some(11),
            temperature_c: Some(18.3),
            humidity_pct: Some(82.0),
            precip_total_mm: Some(1.2),
            precip_rate_mm_per_hr: Some(0.4),
            is_daylight: Some(true),
            observed_at: Some(Utc.with_ymd_and_hms(2024, 7, 14, 15, 25, 0).unwrap()),
            ..PwsReading::default()
        }
    }

    #[tokio::test]
    async fn current_reading_becomes_observation() {
        let mut api = MockApi::new();
        api.expect_current()
            .with(eq("secret"), eq("IMADRI1"))
            .times(1)
            .returning(|_, _| Ok(reading()));

        let adapter = PwsObservationAdapter::from_api(Arc::new(api));
        let observation = adapter.fetch_current(&credentials(), cycle_instant()).await.unwrap();

        assert_eq!(observation.station_name.as_deref(), Some("Chamberí"));
        assert_eq!(observation.condition, "Light Rain");
        assert_eq!(observation.condition_code, Some(11));
        assert_eq!(observation.temperature_c, Some(18.3));
        assert_eq!(observation.precip_total_mm, Some(1.2));
        assert_eq!(observation.is_daylight, Some(true));
        assert_eq!(
            observation.observed_at,
            Utc.with_ymd_and_hms(2024, 7, 14, 15, 25, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn missing_timestamp_uses_cycle_instant() {
        let mut api = MockApi::new();
        api.expect_current().returning(|_, _| {
            Ok(PwsReading {
                observed_at: None,
                ..reading()
            })
        });

        let adapter = PwsObservationAdapter::from_api(Arc::new(api));
        let observation = adapter.fetch_current(&credentials(), cycle_instant()).await.unwrap();
        assert_eq!(observation.observed_at, cycle_instant());
    }

    #[tokio::test]
    async fn undated_hourly_rows_take_cycle_instant() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        let mut api = MockApi::new();
        api.expect_hourly().returning(|_, _, _| {
            Ok(vec![
                PwsReading {
                    observed_at: None,
                    ..reading()
                },
                reading(),
            ])
        });

        let adapter = PwsObservationAdapter::from_api(Arc::new(api));
        let rows = adapter
            .fetch_today_hourly(&credentials(), date, cycle_instant())
            .await
            .unwrap();
        assert_eq!(rows[0].observed_at, cycle_instant());
        assert_eq!(
            rows[1].observed_at,
            Utc.with_ymd_and_hms(2024, 7, 14, 15, 25, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn hourly_passes_date_and_maps_rows() {
        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        let mut api = MockApi::new();
        api.expect_hourly()
            .with(eq("secret"), eq("IMADRI1"), eq(date))
            .times(1)
            .returning(|_, _, _| Ok(vec![reading(), reading()]));

        let adapter = PwsObservationAdapter::from_api(Arc::new(api));
        let rows = adapter
            .fetch_today_hourly(&credentials(), date, cycle_instant())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].precip_rate_mm_per_hr, Some(0.4));
    }

    #[tokio::test]
    async fn errors_are_mapped() {
        let mut api = MockApi::new();
        api.expect_current()
            .times(1)
            .returning(|_, _| Err(PwsError::Fetch { status: 503 }));
        api.expect_hourly()
            .times(1)
            .returning(|_, _, _| Err(PwsError::EmptyResult));

        let adapter = PwsObservationAdapter::from_api(Arc::new(api));
        let current = adapter.fetch_current(&credentials(), cycle_instant()).await.unwrap_err();
        assert!(matches!(current, ApplicationError::Fetch { status: 503 }));
        assert!(current.is_retryable());

        let date = NaiveDate::from_ymd_opt(2024, 7, 14).unwrap();
        let hourly = adapter
            .fetch_today_hourly(&credentials(), date, cycle_instant())
            .await
            .unwrap_err();
        assert!(matches!(hourly, ApplicationError::EmptyResult));
    }

    #[test]
    fn configuration_error_is_not_retryable() {
        let err = PwsObservationAdapter::map_error(PwsError::Configuration("apiKey".into()));
        assert!(matches!(err, ApplicationError::Configuration(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn network_and_parse_map_through() {
        assert!(matches!(
            PwsObservationAdapter::map_error(PwsError::Network("timeout".into())),
            ApplicationError::Network(_)
        ));
        assert!(matches!(
            PwsObservationAdapter::map_error(PwsError::Parse("eof".into())),
            ApplicationError::Parse(_)
        ));
    }
}
