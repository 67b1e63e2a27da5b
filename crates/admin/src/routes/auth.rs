//! Authentication route handlers for admin.
//!
//! Admins sign in with email and password. A successful login rotates the
//! session ID and stores [`CurrentAdmin`] in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::AuthError;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
struct LoginPageTemplate {
    email: String,
    error: Option<&'static str>,
}

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    email: String,
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", get(login_page).post(login))
        .route("/auth/logout", post(logout))
}

/// Render the login page.
///
/// GET /auth/login
async fn login_page() -> LoginPageTemplate {
    LoginPageTemplate {
        email: String::new(),
        error: None,
    }
}

/// Check credentials and start an admin session.
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = match state.auth().login(&form.email, &form.password).await {
        Ok(user) => user,
        Err(AuthError::InvalidCredentials) => {
            let template = LoginPageTemplate {
                email: form.email,
                error: Some("Invalid email or password."),
            };
            return Ok((StatusCode::UNAUTHORIZED, template).into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, "Admin login failed");
            return Err(AppError::Internal("login failed".to_string()));
        }
    };

    let admin = CurrentAdmin::from(&user);
    set_current_admin(&session, &admin).await?;
    set_sentry_user(admin.id.as_i32(), Some(admin.email.as_str()));

    tracing::info!(admin_id = %admin.id, "Admin logged in");
    Ok(Redirect::to("/").into_response())
}

/// Logout and clear session.
///
/// POST /auth/logout
async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/auth/login"))
}
