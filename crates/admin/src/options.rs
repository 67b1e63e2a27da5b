//! Registered option groups for the generic options endpoint.
//!
//! A settings page declares a group and the option keys it owns. The page's
//! form posts to `POST /options` with `option_page=<group>`; only the keys
//! registered for that group are written, so a form cannot touch settings it
//! does not own.

use std::collections::HashMap;

use thiserror::Error;

use checkout_quantity_core::{Capability, LABEL_OPTION_KEY, SettingsError, SettingsStore};

/// Group name of the checkout quantity settings page.
pub const CHECKOUT_QUANTITY_GROUP: &str = "checkout_quantity_settings";

/// Path of the checkout quantity settings page.
pub const CHECKOUT_QUANTITY_PAGE: &str = "/settings/checkout-quantity";

/// Errors saving an option group.
#[derive(Debug, Error)]
pub enum OptionsError {
    /// No group with this name is registered.
    #[error("unknown option group: {0}")]
    UnknownGroup(String),

    /// The settings store failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// The options a settings page owns.
#[derive(Debug, Clone)]
pub struct OptionGroup {
    /// Page to return to after saving.
    pub page_path: &'static str,
    /// Capability needed to write this group.
    pub capability: Capability,
    /// Option keys written by this group.
    pub options: Vec<&'static str>,
}

/// Option groups by name.
#[derive(Debug, Clone, Default)]
pub struct OptionsRegistry {
    groups: HashMap<&'static str, OptionGroup>,
}

impl OptionsRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a group. Re-declaring keeps the options already registered.
    pub fn add_group(
        &mut self,
        name: &'static str,
        page_path: &'static str,
        capability: Capability,
    ) {
        let group = self.groups.entry(name).or_insert_with(|| OptionGroup {
            page_path,
            capability,
            options: Vec::new(),
        });
        group.page_path = page_path;
        group.capability = capability;
    }

    /// Register `option` under an existing group.
    ///
    /// Returns `false` if the group was never declared.
    pub fn register(&mut self, group: &str, option: &'static str) -> bool {
        let Some(group) = self.groups.get_mut(group) else {
            return false;
        };
        if !group.options.contains(&option) {
            group.options.push(option);
        }
        true
    }

    /// Look up a group.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.groups.get(name)
    }

    /// Registry with the checkout quantity label registered.
    #[must_use]
    pub fn with_checkout_quantity() -> Self {
        let mut registry = Self::new();
        registry.add_group(
            CHECKOUT_QUANTITY_GROUP,
            CHECKOUT_QUANTITY_PAGE,
            Capability::ManageCommerce,
        );
        registry.register(CHECKOUT_QUANTITY_GROUP, LABEL_OPTION_KEY);
        registry
    }

    /// Persist the submitted values of every option registered in `group`.
    ///
    /// Registered options missing from `submitted` are left untouched;
    /// submitted fields that are not registered are ignored. Values are stored
    /// as submitted, including the empty string.
    ///
    /// Returns the group so the caller can redirect back to its page.
    ///
    /// # Errors
    ///
    /// Returns `OptionsError::UnknownGroup` for an unregistered group, or
    /// `OptionsError::Settings` if a write fails.
    pub async fn save(
        &self,
        store: &dyn SettingsStore,
        group: &str,
        submitted: &HashMap<String, String>,
    ) -> Result<&OptionGroup, OptionsError> {
        let registered = self
            .group(group)
            .ok_or_else(|| OptionsError::UnknownGroup(group.to_string()))?;

        for option in &registered.options {
            if let Some(value) = submitted.get(*option) {
                store.set(option, value).await?;
                tracing::info!(group, option, "Option saved");
            }
        }

        Ok(registered)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use checkout_quantity_core::{LabelSettings, MemorySettingsStore};
    use std::sync::Arc;

    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_save_writes_registered_label() {
        let store = Arc::new(MemorySettingsStore::new());
        let registry = OptionsRegistry::with_checkout_quantity();

        let group = registry
            .save(
                store.as_ref(),
                CHECKOUT_QUANTITY_GROUP,
                &form(&[("checkout_quantity_label", "Custom Label")]),
            )
            .await
            .unwrap();
        assert_eq!(group.page_path, "/settings/checkout-quantity");

        let labels = LabelSettings::new(store);
        assert_eq!(labels.get_label().await, "Custom Label");
    }

    #[tokio::test]
    async fn test_save_ignores_unregistered_fields() {
        let store = MemorySettingsStore::new();
        let registry = OptionsRegistry::with_checkout_quantity();

        registry
            .save(
                &store,
                CHECKOUT_QUANTITY_GROUP,
                &form(&[("site_name", "Hacked"), ("checkout_quantity_label", "")]),
            )
            .await
            .unwrap();

        assert_eq!(store.get("site_name").await.unwrap(), None);
        assert_eq!(
            store.get(LABEL_OPTION_KEY).await.unwrap().as_deref(),
            Some("")
        );
    }

    #[tokio::test]
    async fn test_unknown_group() {
        let store = MemorySettingsStore::new();
        let err = OptionsRegistry::with_checkout_quantity()
            .save(&store, "general", &HashMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, OptionsError::UnknownGroup(ref g) if g == "general"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = OptionsRegistry::with_checkout_quantity();
        assert!(registry.register(CHECKOUT_QUANTITY_GROUP, LABEL_OPTION_KEY));

        let group = registry.group(CHECKOUT_QUANTITY_GROUP).unwrap();
        assert_eq!(group.options, [LABEL_OPTION_KEY]);
        assert_eq!(group.capability, Capability::ManageCommerce);
    }

    #[test]
    fn test_register_needs_declared_group() {
        let mut registry = OptionsRegistry::new();
        assert!(!registry.register("general", "site_name"));
        assert!(registry.group("general").is_none());
    }
}
