//! Observation source port
//!
//! Defines the interface for retrieving personal weather station readings.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use domain::{Observation, StationCredentials};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for station observation retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObservationPort: Send + Sync {
    /// Fetch the latest observation of the station
    ///
    /// `now` is the cycle instant; a reading without its own timestamp
    /// takes it. Fails with `Network`, `Fetch`, `Parse` or `EmptyResult`.
    async fn fetch_current(
        &self,
        credentials: &StationCredentials,
        now: DateTime<Utc>,
    ) -> Result<Observation, ApplicationError>;

    /// Fetch the hourly history for `date` (station-local calendar day)
    ///
    /// Rows without their own timestamp are stamped `now`.
    async fn fetch_today_hourly(
        &self,
        credentials: &StationCredentials,
        date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<Observation>, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn ObservationPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn ObservationPort>();
    }
}
