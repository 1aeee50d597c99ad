//! Preference store (SQLite) configuration.

use application::ports::{LookupChain, SHARED_NAMESPACE, SHARED_PREFIX, WIDGET_NAMESPACE};
use serde::{Deserialize, Serialize};

use super::default_true;

/// Path value selecting a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the SQLite database file, or `:memory:`
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Maximum number of pooled connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Whether to run pending migrations on startup (default: true)
    #[serde(default = "default_true")]
    pub run_migrations: bool,

    /// Namespace the widget reads and refresh cycles write
    #[serde(default = "default_widget_namespace")]
    pub widget_namespace: String,

    /// Namespace owned by the companion app
    #[serde(default = "default_shared_namespace")]
    pub shared_namespace: String,

    /// Key prefix the companion app uses inside its namespace
    #[serde(default = "default_shared_prefix")]
    pub shared_prefix: String,
}

fn default_store_path() -> String {
    "pws-widget.db".to_string()
}

const fn default_max_connections() -> u32 {
    4
}

fn default_widget_namespace() -> String {
    WIDGET_NAMESPACE.to_string()
}

fn default_shared_namespace() -> String {
    SHARED_NAMESPACE.to_string()
}

fn default_shared_prefix() -> String {
    SHARED_PREFIX.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
            widget_namespace: default_widget_namespace(),
            shared_namespace: default_shared_namespace(),
            shared_prefix: default_shared_prefix(),
        }
    }
}

impl StoreConfig {
    /// Whether the store lives only in memory
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Fallback chain over the configured namespaces
    #[must_use]
    pub fn lookup_chain(&self) -> LookupChain {
        LookupChain::standard(
            self.widget_namespace.clone(),
            self.shared_namespace.clone(),
            self.shared_prefix.clone(),
        )
    }
}
