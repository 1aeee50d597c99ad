//! Weather.com PWS integration
//!
//! Client for the personal weather station observation endpoints of the
//! weather.com v2 API (<https://api.weather.com>). Provides the latest
//! observation and the hourly history of a single day.

pub mod client;
mod models;

pub use client::{PwsApi, PwsClient, PwsConfig, PwsError};
pub use models::{DayFlag, MetricBlock, ObservationsResponse, PwsObservation, PwsReading};
