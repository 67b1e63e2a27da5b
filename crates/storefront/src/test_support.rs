//! Helpers for driving the storefront router in tests.

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use checkout_quantity_core::SettingsStore;

use crate::catalog::Catalog;
use crate::config::{CheckoutConfig, StorefrontConfig};
use crate::middleware::session::session_layer;
use crate::routes;
use crate::state::AppState;

pub fn config() -> StorefrontConfig {
    StorefrontConfig {
        database_url: SecretString::from("postgres://localhost/test"),
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        base_url: "http://localhost:3000".to_string(),
        catalog_path: PathBuf::from("catalog.yaml"),
        checkout: CheckoutConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

pub fn app(settings: Arc<dyn SettingsStore>) -> Router {
    let config = config();
    let catalog = Catalog::from_yaml(include_str!("../catalog.yaml")).unwrap();
    let layer = session_layer(MemoryStore::default(), &config);
    routes::app(AppState::new(config, settings, catalog), layer)
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
