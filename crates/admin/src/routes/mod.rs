//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                       - Health check
//!
//! # Dashboard
//! GET  /                             - Dashboard with the admin menu
//!
//! # Auth (email and password)
//! GET  /auth/login                   - Login page
//! POST /auth/login                   - Check credentials, start session
//! POST /auth/logout                  - Logout
//!
//! # Settings (requires manage-commerce capability)
//! GET  /settings/checkout-quantity   - Checkout quantity settings page
//! POST /options                      - Save a registered option group
//! ```

pub mod auth;
pub mod dashboard;
pub mod options;
pub mod settings;

use axum::{Router, routing::get};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(settings::router())
        .merge(options::router())
}

/// Build the admin application with its session layer.
///
/// Sentry and HTTP tracing layers are added by the binary.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    routes().layer(session_layer).with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub(crate) mod test_support {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, header};
    use secrecy::SecretString;
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use checkout_quantity_core::{AdminRole, MemorySettingsStore};

    use crate::config::AdminConfig;
    use crate::db::MemoryAdminUserStore;
    use crate::middleware::session::session_layer;
    use crate::state::AppState;

    pub const PASSWORD: &str = "correct horse battery";

    pub fn config() -> AdminConfig {
        AdminConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            base_url: "http://localhost:3001".to_string(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// State with one admin of each role: `admin@`, `viewer@` and `owner@`
    /// `example.com`, all using [`PASSWORD`].
    pub async fn state(settings: Arc<MemorySettingsStore>) -> AppState {
        let state = AppState::new(config(), settings, Arc::new(MemoryAdminUserStore::new()));
        for (email, role) in [
            ("admin@example.com", AdminRole::Admin),
            ("viewer@example.com", AdminRole::Viewer),
            ("owner@example.com", AdminRole::SuperAdmin),
        ] {
            state
                .auth()
                .create_admin(email, "Test Admin", role, PASSWORD)
                .await
                .unwrap();
        }
        state
    }

    pub fn app(state: AppState) -> Router {
        let layer = session_layer(MemoryStore::default(), &config());
        super::app(state, layer)
    }

    /// A browser stand-in that carries the session cookie between requests.
    pub struct Client {
        app: Router,
        cookie: Option<String>,
    }

    impl Client {
        pub const fn new(app: Router) -> Self {
            Self { app, cookie: None }
        }

        /// Log in through the login form.
        pub async fn logged_in(app: Router, email: &str) -> Self {
            let mut client = Self::new(app);
            let body = format!("email={}&password={}", email, PASSWORD.replace(' ', "+"));
            let response = client.post_form("/auth/login", &body).await;
            assert_eq!(response.status(), 303, "login failed for {email}");
            client
        }

        pub async fn get(&mut self, uri: &str) -> Response<Body> {
            self.send(Request::get(uri).body(Body::empty()).unwrap()).await
        }

        pub async fn post_form(&mut self, uri: &str, body: &str) -> Response<Body> {
            let request = Request::post(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap();
            self.send(request).await
        }

        async fn send(&mut self, mut request: Request<Body>) -> Response<Body> {
            if let Some(cookie) = &self.cookie {
                request
                    .headers_mut()
                    .insert(header::COOKIE, cookie.parse().unwrap());
            }

            let response = self.app.clone().oneshot(request).await.unwrap();

            if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
                let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
                self.cookie = Some(pair.to_owned());
            }
            response
        }
    }

    pub async fn body_text(response: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    pub fn location(response: &Response<Body>) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }
}
