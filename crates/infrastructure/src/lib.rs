//! Infrastructure layer - Adapters for external systems
//!
//! Implements the ports defined in the application layer: the PWS HTTP
//! source, SQLite and in-memory preference stores. Also holds configuration
//! loading, the cron scheduler driving refresh cycles, backoff and logging
//! setup.

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod retry;
pub mod scheduled_tasks;
pub mod scheduler;
pub mod telemetry;

pub use adapters::*;
pub use config::{
    AppConfig, ScheduleConfig, StationConfig, StoreConfig, TelemetryAppConfig,
};
pub use persistence::{ConnectionPool, DatabaseError, SqlitePreferenceStore, create_pool};
pub use retry::{RetryConfig, RetryResult, Retryable, with_retry};
pub use scheduled_tasks::{REFRESH_TASK, RefreshTask};
pub use scheduler::{SchedulerError, TaskScheduler};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
