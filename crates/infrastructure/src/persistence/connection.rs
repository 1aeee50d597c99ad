//! Database connection management
//!
//! Provides SQLite connection pooling via r2d2.

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{debug, info};

use super::error::DatabaseError;
use crate::config::StoreConfig;

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Create a new connection pool
///
/// An in-memory database is private to its connection, so the pool is
/// capped at one connection in that case.
pub fn create_pool(config: &StoreConfig) -> Result<ConnectionPool, DatabaseError> {
    info!(path = %config.path, max_connections = config.max_connections, "Creating preference store pool");

    let (manager, max_size) = if config.is_in_memory() {
        (SqliteConnectionManager::memory(), 1)
    } else {
        if let Some(parent) = Path::new(&config.path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Migration(format!("Failed to create database directory: {e}"))
            })?;
        }
        (
            SqliteConnectionManager::file(&config.path),
            config.max_connections.max(1),
        )
    };

    let manager = manager.with_init(|conn| {
        conn.execute_batch("PRAGMA busy_timeout = 5000;")
    });

    let pool = Pool::builder().max_size(max_size).build(manager)?;

    {
        let conn = pool.get()?;
        initialize_database(&conn, config.is_in_memory())?;
        if config.run_migrations {
            super::migrations::run_migrations(&conn)?;
        }
    }

    debug!("Preference store pool created");
    Ok(pool)
}

/// Database-wide settings, applied once
fn initialize_database(conn: &Connection, in_memory: bool) -> Result<(), DatabaseError> {
    if !in_memory {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> StoreConfig {
        StoreConfig {
            path: ":memory:".to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn create_in_memory_pool() {
        let pool = create_pool(&memory_config()).unwrap();
        assert_eq!(pool.max_size(), 1);
        assert!(pool.get().is_ok());
    }

    #[test]
    fn migrations_create_preferences_table() {
        let pool = create_pool(&memory_config()).unwrap();
        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'preferences'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("widget.db");
        let config = StoreConfig {
            path: path.to_string_lossy().into_owned(),
            max_connections: 2,
            ..StoreConfig::default()
        };

        let pool = create_pool(&config).unwrap();
        assert_eq!(pool.max_size(), 2);
        assert!(path.exists());
    }
}
