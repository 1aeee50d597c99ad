//! Application layer - Use cases and orchestration
//!
//! Holds the refresh pipeline and the pure logic it is built from:
//! precipitation reconciliation, icon classification and display
//! formatting. Defines the ports the infrastructure layer implements.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
