//! In-memory preference store
//!
//! Backs tests and `--ephemeral` runs. Nothing survives the process.

use std::collections::HashMap;

use application::{error::ApplicationError, ports::PreferenceStorePort};
use async_trait::async_trait;
use parking_lot::RwLock;

type Entries = HashMap<(String, String), String>;

/// Preference store held in a map keyed by `(namespace, key)`
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    entries: RwLock<Entries>,
}

impl InMemoryPreferenceStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with `(namespace, key, value)` triples
    #[must_use]
    pub fn with_entries<'a>(seed: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>) -> Self {
        let entries = seed
            .into_iter()
            .map(|(ns, key, value)| ((ns.to_string(), key.to_string()), value.to_string()))
            .collect();
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Number of stored values across all namespaces
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl PreferenceStorePort for InMemoryPreferenceStore {
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, ApplicationError> {
        Ok(self
            .entries
            .read()
            .get(&(namespace.to_string(), key.to_string()))
            .cloned())
    }

    async fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), ApplicationError> {
        self.entries
            .write()
            .insert((namespace.to_string(), key.to_string()), value.to_string());
        Ok(())
    }

    async fn set_all(
        &self,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<(), ApplicationError> {
        let mut map = self.entries.write();
        for (key, value) in entries {
            map.insert((namespace.to_string(), key.clone()), value.clone());
        }
        Ok(())
    }
}
