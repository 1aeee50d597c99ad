//! Preference store port
//!
//! A namespaced string key-value store shared with the rendering surface.
//! Reads go through a [`LookupChain`]: an ordered list of
//! `(namespace, key transform)` steps where the first present value wins.

use std::borrow::Cow;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tracing::trace;

use crate::error::ApplicationError;

/// Namespace the widget host reads from and the refresher writes to
pub const WIDGET_NAMESPACE: &str = "HomeWidgetPreferences";
/// Namespace owned by the companion app
pub const SHARED_NAMESPACE: &str = "FlutterSharedPreferences";
/// Prefix the companion app puts in front of its keys
pub const SHARED_PREFIX: &str = "flutter.";

/// Port for namespaced preference persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PreferenceStorePort: Send + Sync {
    /// Read one value
    async fn get(&self, namespace: &str, key: &str) -> Result<Option<String>, ApplicationError>;

    /// Write one value
    async fn set(&self, namespace: &str, key: &str, value: &str) -> Result<(), ApplicationError>;

    /// Write every entry or none of them
    async fn set_all(
        &self,
        namespace: &str,
        entries: &[(String, String)],
    ) -> Result<(), ApplicationError>;
}

/// How a logical key is turned into a stored key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyTransform {
    /// Use the key as is
    Identity,
    /// Prepend a fixed prefix
    Prefixed(String),
}

impl KeyTransform {
    /// Apply the transform to a logical key
    #[must_use]
    pub fn apply<'a>(&self, key: &'a str) -> Cow<'a, str> {
        match self {
            Self::Identity => Cow::Borrowed(key),
            Self::Prefixed(prefix) => Cow::Owned(format!("{prefix}{key}")),
        }
    }
}

/// One step of a lookup chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupStep {
    /// Namespace to read from
    pub namespace: String,
    /// Key transform applied before reading
    pub transform: KeyTransform,
}

impl LookupStep {
    /// Create a lookup step
    #[must_use]
    pub fn new(namespace: impl Into<String>, transform: KeyTransform) -> Self {
        Self {
            namespace: namespace.into(),
            transform,
        }
    }
}

/// Ordered fallback reads across namespaces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupChain {
    steps: Vec<LookupStep>,
}

impl LookupChain {
    /// Build a chain from explicit steps
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Configuration` when `steps` is empty.
    pub fn new(steps: Vec<LookupStep>) -> Result<Self, ApplicationError> {
        if steps.is_empty() {
            return Err(ApplicationError::Configuration(
                "lookup chain needs at least one step".to_string(),
            ));
        }
        Ok(Self { steps })
    }

    /// Widget namespace, then prefixed shared key, then bare shared key
    #[must_use]
    pub fn standard(
        widget_namespace: impl Into<String>,
        shared_namespace: impl Into<String>,
        shared_prefix: impl Into<String>,
    ) -> Self {
        let shared_namespace = shared_namespace.into();
        Self {
            steps: vec![
                LookupStep::new(widget_namespace, KeyTransform::Identity),
                LookupStep::new(
                    shared_namespace.clone(),
                    KeyTransform::Prefixed(shared_prefix.into()),
                ),
                LookupStep::new(shared_namespace, KeyTransform::Identity),
            ],
        }
    }

    /// The standard chain with the stock namespace names
    #[must_use]
    pub fn default_chain() -> Self {
        Self::standard(WIDGET_NAMESPACE, SHARED_NAMESPACE, SHARED_PREFIX)
    }

    /// Steps in resolution order
    #[must_use]
    pub fn steps(&self) -> &[LookupStep] {
        &self.steps
    }

    /// Namespace that refresh results are written to (the first step's)
    #[must_use]
    pub fn write_namespace(&self) -> &str {
        self.steps.first().map_or(WIDGET_NAMESPACE, |s| s.namespace.as_str())
    }

    /// Resolve a logical key: the first step holding a value wins
    pub async fn resolve(
        &self,
        store: &dyn PreferenceStorePort,
        key: &str,
    ) -> Result<Option<String>, ApplicationError> {
        for step in &self.steps {
            let stored_key = step.transform.apply(key);
            if let Some(value) = store.get(&step.namespace, &stored_key).await? {
                trace!(key, namespace = %step.namespace, stored_key = %stored_key, "Preference resolved");
                return Ok(Some(value));
            }
        }
        Ok(None)
    }
}

impl Default for LookupChain {
    fn default() -> Self {
        Self::default_chain()
    }
}
