//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus either a
//! human-readable or a JSON formatter writing to stderr.

mod logging;

pub use logging::{TelemetryConfig, TelemetryError, init_telemetry};
