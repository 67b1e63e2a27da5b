//! Application state shared across handlers.

use std::sync::Arc;

use checkout_quantity_core::{LabelSettings, SettingsStore};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::hooks::HookRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the settings store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    settings: Arc<dyn SettingsStore>,
    catalog: Catalog,
    hooks: HookRegistry,
}

impl AppState {
    /// Create a new application state with the checkout quantity hooks
    /// registered.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `settings` - Site-wide settings store
    /// * `catalog` - Products available to add to the cart
    #[must_use]
    pub fn new(config: StorefrontConfig, settings: Arc<dyn SettingsStore>, catalog: Catalog) -> Self {
        let hooks = HookRegistry::with_checkout_quantity(
            LabelSettings::new(Arc::clone(&settings)),
            config.checkout.debounce_delay,
        );

        Self {
            inner: Arc::new(AppStateInner {
                config,
                settings,
                catalog,
                hooks,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the settings store.
    #[must_use]
    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.inner.settings
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the registered checkout hooks.
    #[must_use]
    pub fn hooks(&self) -> &HookRegistry {
        &self.inner.hooks
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("hooks", &self.inner.hooks)
            .finish_non_exhaustive()
    }
}
