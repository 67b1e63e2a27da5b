//! Checkout quantity settings page.
//!
//! The form posts to `/options` with the option group name in
//! `option_page`; see [`super::options`].

use askama::Template;
use axum::{
    Router,
    extract::{Query, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use checkout_quantity_core::{Capability, LABEL_OPTION_KEY};

use crate::error::Result;
use crate::middleware::csrf::CSRF_FIELD;
use crate::middleware::{RequireAdminAuth, csrf_token, require_capability};
use crate::options::{CHECKOUT_QUANTITY_GROUP, CHECKOUT_QUANTITY_PAGE};
use crate::state::AppState;

use super::dashboard::AdminUserView;

/// Checkout quantity settings page template.
#[derive(Template)]
#[template(path = "settings/checkout_quantity.html")]
pub struct CheckoutQuantitySettingsTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    pub option_page: &'static str,
    pub option_key: &'static str,
    pub csrf_field: &'static str,
    pub csrf_token: String,
    pub label: String,
    pub saved: bool,
}

/// Query string set by the options endpoint after a save.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPageQuery {
    #[serde(rename = "settings-updated")]
    settings_updated: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new().route(CHECKOUT_QUANTITY_PAGE, get(checkout_quantity))
}

/// Render the settings page with the stored label.
///
/// GET /settings/checkout-quantity
#[instrument(skip(admin, state, session))]
async fn checkout_quantity(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SettingsPageQuery>,
) -> Result<Html<String>> {
    require_capability(&admin, Capability::ManageCommerce)?;

    let template = CheckoutQuantitySettingsTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: CHECKOUT_QUANTITY_PAGE.to_string(),
        option_page: CHECKOUT_QUANTITY_GROUP,
        option_key: LABEL_OPTION_KEY,
        csrf_field: CSRF_FIELD,
        csrf_token: csrf_token(&session).await?,
        label: state.labels().get_label().await,
        saved: query.settings_updated.as_deref() == Some("true"),
    };

    Ok(Html(template.render()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use checkout_quantity_core::{DEFAULT_LABEL, MemorySettingsStore, SettingsStore};

    use super::*;
    use crate::routes::test_support::{Client, app, body_text, location, state};

    #[tokio::test]
    async fn test_shows_default_label() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "admin@example.com").await;

        let response = client.get(CHECKOUT_QUANTITY_PAGE).await;
        assert_eq!(response.status(), 200);
        let body = body_text(response).await;
        assert!(body.contains("<h1>Checkout Quantity Settings</h1>"));
        assert!(body.contains("Label for Quantity:"));
        assert!(body.contains(&format!(r#"value="{DEFAULT_LABEL}""#)));
        assert!(body.contains(r#"name="checkout_quantity_label""#));
        assert!(body.contains(r#"value="checkout_quantity_settings""#));
        assert!(!body.contains("Settings saved."));
    }

    #[tokio::test]
    async fn test_shows_stored_label_escaped() {
        let settings = Arc::new(MemorySettingsStore::new());
        settings
            .set(LABEL_OPTION_KEY, r#"Seats "per" day"#)
            .await
            .unwrap();
        let state = state(settings).await;
        let mut client = Client::logged_in(app(state), "admin@example.com").await;

        let body = body_text(client.get(CHECKOUT_QUANTITY_PAGE).await).await;
        assert!(body.contains("Seats &#34;per&#34; day"));
    }

    #[tokio::test]
    async fn test_saved_notice() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "admin@example.com").await;

        let body = body_text(
            client
                .get("/settings/checkout-quantity?settings-updated=true")
                .await,
        )
        .await;
        assert!(body.contains("Settings saved."));
    }

    #[tokio::test]
    async fn test_viewer_forbidden() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "viewer@example.com").await;

        assert_eq!(client.get(CHECKOUT_QUANTITY_PAGE).await.status(), 403);
    }

    #[tokio::test]
    async fn test_anonymous_redirected() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::new(app(state));

        let response = client.get(CHECKOUT_QUANTITY_PAGE).await;
        assert_eq!(location(&response), "/auth/login");
    }
}
