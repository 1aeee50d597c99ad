//! SQLite preference store
//!
//! Implements the `PreferenceStorePort` on the `preferences` table.
//! Blocking SQLite calls run on the tokio blocking pool.

use std::sync::Arc;

use application::{error::ApplicationError, ports::PreferenceStorePort};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{OptionalExtension, params};
use tokio::task;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConn};
use super::error::DatabaseError;

const UPSERT_SQL: &str = "INSERT INTO preferences (namespace, key, value, updated_at)
     VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT(namespace, key) DO UPDATE SET
         value = excluded.value,
         updated_at = excluded.updated_at";

/// SQLite-based preference store
#[derive(Debug, Clone)]
pub struct SqlitePreferenceStore {
    pool: Arc<ConnectionPool>,
}

impl SqlitePreferenceStore {
    /// Create a new SQLite preference store
    #[must_use]
    pub const fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    async fn with_connection<F, T>(&self, f: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&mut PooledConn) -> Result<T, DatabaseError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = Arc::clone(&self.pool);
        task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }

    /// Every entry of one namespace, ordered by key
    #[instrument(skip(self))]
    pub async fn entries(&self, namespace: &str) -> Result<Vec<(String, String)>, ApplicationError> {
        let namespace = namespace.to_string();
        let rows = self
            .with_connection(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key, value FROM preferences WHERE namespace = ?1 ORDER BY key",
                )?;
                let rows = stmt
                    .query_map([&namespace], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<Result<Vec<(String, String)>, _>>()?;
                Ok(rows)
            })
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl PreferenceStorePort for SqlitePreferenceStore {
    #[instrument(skip(self))]
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, ApplicationError> {
        let namespace = namespace.to_string();
        let key = key.to_string();

        let value = self
            .with_connection(move |conn| {
                let value: Option<String> = conn
                    .query_row(
                        "SELECT value FROM preferences WHERE namespace = ?1 AND key = ?2",
                        [&namespace, &key],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(value)
            })
            .await?;
        Ok(value)
    }

    #[instrument(skip(self, value))]
    async fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), ApplicationError> {
        let namespace = namespace.to_string();
        let key = key.to_string();
        let value = value.to_string();

        self.with_connection(move |conn| {
            conn.execute(
                UPSERT_SQL,
                params![namespace, key, value, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
        .await?;
        Ok(())
    }

    #[instrument(skip(self, entries), fields(count = entries.len()))]
    async fn set_all(
        &self,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<(), ApplicationError> {
        let namespace = namespace.to_string();
        let entries = entries.to_vec();

        self.with_connection(move |conn| {
            let updated_at = Utc::now().to_rfc3339();
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(UPSERT_SQL)?;
                for (key, value) in &entries {
                    stmt.execute(params![namespace, key, value, updated_at])?;
                }
            }
            tx.commit()?;
            debug!(count = entries.len(), "Preferences written");
            Ok(())
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::persistence::create_pool;

    fn store() -> SqlitePreferenceStore {
        let config = StoreConfig {
            path: ":memory:".to_string(),
            ..StoreConfig::default()
        };
        SqlitePreferenceStore::new(Arc::new(create_pool(&config).unwrap()))
    }

    #[tokio::test]
    async fn missing_key_is_none() {
        let store = store();
        assert_eq!(store.get("ns", "temp").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get() {
        let store = store();
        store.set("ns", "temp", "21.3").await.unwrap();
        assert_eq!(store.get("ns", "temp").await.unwrap().as_deref(), Some("21.3"));
    }

    #[tokio::test]
    async fn set_overwrites() {
        let store = store();
        store.set("ns", "temp", "21.3").await.unwrap();
        store.set("ns", "temp", "22.0").await.unwrap();
        assert_eq!(store.get("ns", "temp").await.unwrap().as_deref(), Some("22.0"));
    }

    #[tokio::test]
    async fn namespaces_are_isolated() {
        let store = store();
        store.set("a", "temp", "1").await.unwrap();
        assert_eq!(store.get("b", "temp").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_all_writes_every_entry() {
        let store = store();
        let entries = vec![
            ("temp".to_string(), "21.3".to_string()),
            ("humidity".to_string(), "65".to_string()),
        ];
        store.set_all("ns", &entries).await.unwrap();

        assert_eq!(
            store.entries("ns").await.unwrap(),
            vec![
                ("humidity".to_string(), "65".to_string()),
                ("temp".to_string(), "21.3".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn failed_batch_leaves_previous_values() {
        let store = store();
        store.set("ns", "temp", "old").await.unwrap();

        store
            .with_connection(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_boom BEFORE INSERT ON preferences
                     WHEN NEW.key = 'boom'
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )?;
                Ok(())
            })
            .await
            .unwrap();

        let entries = vec![
            ("temp".to_string(), "new".to_string()),
            ("boom".to_string(), "x".to_string()),
        ];
        let err = store.set_all("ns", &entries).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Storage(_)));
        assert_eq!(store.get("ns", "temp").await.unwrap().as_deref(), Some("old"));
        assert_eq!(store.get("ns", "boom").await.unwrap(), None);
    }
}
