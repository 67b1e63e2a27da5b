//! Application state shared across handlers.

use std::sync::Arc;

use checkout_quantity_core::{LabelSettings, SettingsStore};

use crate::config::AdminConfig;
use crate::db::AdminUserStore;
use crate::options::OptionsRegistry;
use crate::services::AdminAuthService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    settings: Arc<dyn SettingsStore>,
    users: Arc<dyn AdminUserStore>,
    auth: AdminAuthService,
    options: OptionsRegistry,
}

impl AppState {
    /// Create the admin state with the checkout quantity option group
    /// registered.
    #[must_use]
    pub fn new(
        config: AdminConfig,
        settings: Arc<dyn SettingsStore>,
        users: Arc<dyn AdminUserStore>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                settings,
                auth: AdminAuthService::new(Arc::clone(&users)),
                users,
                options: OptionsRegistry::with_checkout_quantity(),
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Raw settings store, for the generic options endpoint.
    #[must_use]
    pub fn settings(&self) -> &dyn SettingsStore {
        self.inner.settings.as_ref()
    }

    /// Typed access to the checkout quantity label.
    #[must_use]
    pub fn labels(&self) -> LabelSettings {
        LabelSettings::new(Arc::clone(&self.inner.settings))
    }

    #[must_use]
    pub fn users(&self) -> &dyn AdminUserStore {
        self.inner.users.as_ref()
    }

    #[must_use]
    pub fn auth(&self) -> &AdminAuthService {
        &self.inner.auth
    }

    #[must_use]
    pub fn options(&self) -> &OptionsRegistry {
        &self.inner.options
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("options", &self.inner.options)
            .finish_non_exhaustive()
    }
}
