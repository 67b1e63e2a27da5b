//! Dashboard route handler.

use askama::Template;
use axum::{Router, extract::State, response::Html, routing::get};
use tracing::instrument;

use checkout_quantity_core::{AdminRole, Capability};

use crate::{
    error::Result, middleware::auth::RequireAdminAuth, models::CurrentAdmin, state::AppState,
};

/// Admin user view for templates.
#[derive(Debug, Clone)]
pub struct AdminUserView {
    pub name: String,
    pub email: String,
    pub is_super_admin: bool,
    /// Whether the Commerce menu is shown.
    pub can_manage_commerce: bool,
}

impl From<&CurrentAdmin> for AdminUserView {
    fn from(admin: &CurrentAdmin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.to_string(),
            is_super_admin: admin.role == AdminRole::SuperAdmin,
            can_manage_commerce: admin.can(Capability::ManageCommerce),
        }
    }
}

/// Row in the admin accounts table.
#[derive(Debug, Clone)]
pub struct AdminAccountView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

/// Dashboard template.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin_user: AdminUserView,
    pub current_path: String,
    /// Only filled for admins who may manage other admins.
    pub admins: Vec<AdminAccountView>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard page handler.
#[instrument(skip(admin, state))]
pub async fn dashboard(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Html<String>> {
    let admins = if admin.can(Capability::ManageAdmins) {
        state
            .users()
            .list_all()
            .await?
            .into_iter()
            .map(|user| AdminAccountView {
                name: user.name,
                email: user.email.to_string(),
                role: user.role.to_string(),
                created_at: user.created_at.format("%Y-%m-%d").to_string(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let template = DashboardTemplate {
        admin_user: AdminUserView::from(&admin),
        current_path: "/".to_string(),
        admins,
    };

    Ok(Html(template.render()?))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use checkout_quantity_core::MemorySettingsStore;

    use crate::routes::test_support::{Client, app, body_text, location, state};

    #[tokio::test]
    async fn test_anonymous_redirected_to_login() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::new(app(state));

        let response = client.get("/").await;
        assert_eq!(response.status(), 303);
        assert_eq!(location(&response), "/auth/login");
    }

    #[tokio::test]
    async fn test_commerce_menu_links_checkout_quantity() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "admin@example.com").await;

        let body = body_text(client.get("/").await).await;
        assert!(body.contains("Commerce"));
        assert!(body.contains(r#"href="/settings/checkout-quantity""#));
        assert!(!body.contains("Admin accounts"));
    }

    #[tokio::test]
    async fn test_viewer_has_no_commerce_menu() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "viewer@example.com").await;

        let body = body_text(client.get("/").await).await;
        assert!(!body.contains(r#"href="/settings/checkout-quantity""#));
    }

    #[tokio::test]
    async fn test_super_admin_sees_accounts() {
        let state = state(Arc::new(MemorySettingsStore::new())).await;
        let mut client = Client::logged_in(app(state), "owner@example.com").await;

        let body = body_text(client.get("/").await).await;
        assert!(body.contains("Admin accounts"));
        assert!(body.contains("viewer@example.com"));
    }
}
