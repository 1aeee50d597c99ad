//! Persistence module
//!
//! SQLite-backed preference storage.

pub mod connection;
pub mod error;
pub mod migrations;
pub mod preference_store;

pub use connection::{ConnectionPool, create_pool};
pub use error::DatabaseError;
pub use preference_store::SqlitePreferenceStore;
