//! Persistence errors and their mapping into the application layer

use application::error::ApplicationError;
use thiserror::Error;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Blocking task failed: {0}")]
    Join(String),
}

impl From<tokio::task::JoinError> for DatabaseError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Join(err.to_string())
    }
}

impl From<DatabaseError> for ApplicationError {
    fn from(err: DatabaseError) -> Self {
        Self::Storage(err.to_string())
    }
}
