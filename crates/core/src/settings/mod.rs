//! Site-wide settings storage.
//!
//! Settings are plain string values keyed by a fixed name. Backends implement
//! [`SettingsStore`] and are injected into whichever service reads or writes
//! settings; nothing here is a global.

#[cfg(feature = "postgres")]
mod postgres;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use thiserror::Error;

#[cfg(feature = "postgres")]
pub use postgres::PgSettingsStore;

/// Settings key of the checkout quantity field label.
pub const LABEL_OPTION_KEY: &str = "checkout_quantity_label";

/// Label shown when no label has ever been saved.
pub const DEFAULT_LABEL: &str = "How Many Minutes?";

/// Error type for settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The storage backend failed.
    #[error("settings backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SettingsError {
    /// Wrap a backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Persistent key-value storage for site-wide settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read a setting. `Ok(None)` means it was never written.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Backend` if the storage backend fails.
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

    /// Write a setting, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Backend` if the storage backend fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;
}

/// In-process settings store.
///
/// Used by tests and by local runs that do not need persistence.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        Ok(self.values.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.values.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed access to the checkout quantity label.
#[derive(Clone)]
pub struct LabelSettings {
    store: Arc<dyn SettingsStore>,
}

impl LabelSettings {
    /// Wrap a settings store.
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self { store }
    }

    /// Get the label for the checkout quantity field.
    ///
    /// Falls back to [`DEFAULT_LABEL`] when no label was saved. A saved empty
    /// string is returned as-is. Backend failures are logged and also fall
    /// back to the default, so rendering never fails on settings.
    pub async fn get_label(&self) -> String {
        match self.store.get(LABEL_OPTION_KEY).await {
            Ok(Some(label)) => label,
            Ok(None) => DEFAULT_LABEL.to_owned(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read checkout quantity label, using default");
                DEFAULT_LABEL.to_owned()
            }
        }
    }

    /// Persist a new label. The raw string is stored without validation.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Backend` if the storage backend fails.
    pub async fn set_label(&self, value: &str) -> Result<(), SettingsError> {
        self.store.set(LABEL_OPTION_KEY, value).await
    }
}

impl std::fmt::Debug for LabelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LabelSettings").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    struct FailingStore;

    #[async_trait]
    impl SettingsStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, SettingsError> {
            Err(SettingsError::backend(std::io::Error::other("connection refused")))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), SettingsError> {
            Err(SettingsError::backend(std::io::Error::other("connection refused")))
        }
    }

    fn memory_labels() -> LabelSettings {
        LabelSettings::new(Arc::new(MemorySettingsStore::new()))
    }

    #[tokio::test]
    async fn test_default_label_without_write() {
        assert_eq!(memory_labels().get_label().await, "How Many Minutes?");
    }

    #[tokio::test]
    async fn test_label_after_write() {
        let labels = memory_labels();
        labels.set_label("Custom Label").await.unwrap();
        assert_eq!(labels.get_label().await, "Custom Label");
    }

    #[tokio::test]
    async fn test_empty_label_is_kept() {
        let labels = memory_labels();
        labels.set_label("").await.unwrap();
        assert_eq!(labels.get_label().await, "");
    }

    #[tokio::test]
    async fn test_raw_markup_is_stored_unescaped() {
        let labels = memory_labels();
        labels.set_label("<b>Minutes</b> & more").await.unwrap();
        assert_eq!(labels.get_label().await, "<b>Minutes</b> & more");
    }

    #[tokio::test]
    async fn test_backend_failure_falls_back_to_default() {
        let labels = LabelSettings::new(Arc::new(FailingStore));
        assert_eq!(labels.get_label().await, DEFAULT_LABEL);
        assert!(labels.set_label("x").await.is_err());
    }

    #[tokio::test]
    async fn test_memory_store_is_keyed() {
        let store = MemorySettingsStore::new();
        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").await.unwrap(), None);
    }
}
