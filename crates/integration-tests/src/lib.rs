//! Integration tests for the checkout quantity storefront and admin.
//!
//! # Running Tests
//!
//! ```bash
//! # In-process tests (no database needed)
//! cargo test -p checkout-quantity-integration-tests
//!
//! # Against running servers sharing one database
//! STOREFRONT_BASE_URL=http://localhost:3000 ADMIN_BASE_URL=http://localhost:3001 \
//!     cargo test -p checkout-quantity-integration-tests -- --ignored
//! ```
//!
//! [`TestStack`] serves both applications on loopback ports, backed by one
//! shared in-memory settings store, and tests drive them over HTTP with
//! `reqwest` the way a browser would.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use secrecy::SecretString;
use tokio::net::TcpListener;
use tower_sessions::MemoryStore;

use checkout_quantity_admin::config::AdminConfig;
use checkout_quantity_admin::db::MemoryAdminUserStore;
use checkout_quantity_admin::state::AppState as AdminState;
use checkout_quantity_core::{AdminRole, MemorySettingsStore};
use checkout_quantity_storefront::catalog::Catalog;
use checkout_quantity_storefront::config::{CheckoutConfig, StorefrontConfig};
use checkout_quantity_storefront::state::AppState as StorefrontState;

/// Password given to every admin created through [`TestStack::create_admin`].
pub const ADMIN_PASSWORD: &str = "integration-password";

/// Storefront and admin served in-process over one settings store.
pub struct TestStack {
    pub storefront_url: String,
    pub admin_url: String,
    pub settings: Arc<MemorySettingsStore>,
    admin: AdminState,
}

impl TestStack {
    /// Bind both applications to ephemeral loopback ports and start serving.
    pub async fn spawn() -> Self {
        let settings = Arc::new(MemorySettingsStore::new());

        let storefront_config = storefront_config();
        let catalog = Catalog::from_yaml(include_str!("../../storefront/catalog.yaml"))
            .expect("Bundled catalog is invalid");
        let storefront_state =
            StorefrontState::new(storefront_config.clone(), settings.clone(), catalog);
        let storefront = checkout_quantity_storefront::routes::app(
            storefront_state,
            checkout_quantity_storefront::middleware::session::session_layer(
                MemoryStore::default(),
                &storefront_config,
            ),
        );

        let admin_config = admin_config();
        let admin = AdminState::new(
            admin_config.clone(),
            settings.clone(),
            Arc::new(MemoryAdminUserStore::new()),
        );
        let admin_app = checkout_quantity_admin::routes::app(
            admin.clone(),
            checkout_quantity_admin::middleware::session::session_layer(
                MemoryStore::default(),
                &admin_config,
            ),
        );

        let storefront_addr = serve(storefront).await;
        let admin_addr = serve(admin_app).await;

        Self {
            storefront_url: format!("http://{storefront_addr}"),
            admin_url: format!("http://{admin_addr}"),
            settings,
            admin,
        }
    }

    /// Create an admin account that can log in with [`ADMIN_PASSWORD`].
    pub async fn create_admin(&self, email: &str, role: AdminRole) {
        self.admin
            .auth()
            .create_admin(email, "Integration Admin", role, ADMIN_PASSWORD)
            .await
            .expect("Failed to create admin");
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind loopback port");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server error");
    });
    addr
}

/// A cookie-carrying client, one per simulated browser.
pub fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Pull the value of a named input out of rendered HTML.
///
/// Expects the `name` attribute to come directly before `value`.
pub fn input_value(html: &str, name: &str) -> Option<String> {
    let marker = format!(r#"name="{name}" value=""#);
    let start = html.find(&marker)? + marker.len();
    let len = html.get(start..)?.find('"')?;
    html.get(start..start + len).map(str::to_owned)
}

fn storefront_config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://unused"),
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        catalog_path: PathBuf::from("catalog.yaml"),
        checkout: CheckoutConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

fn admin_config() -> AdminConfig {
    AdminConfig {
        database_url: SecretString::from("postgres://unused"),
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_value() {
        let html = r#"<input type="hidden" name="_token" value="abc-123">"#;
        assert_eq!(input_value(html, "_token").as_deref(), Some("abc-123"));
        assert_eq!(input_value(html, "missing"), None);
    }
}
