//! Generic options endpoint.
//!
//! Every settings page posts here. The submitted `option_page` names a group
//! in the [`OptionsRegistry`](crate::options::OptionsRegistry); only the
//! options registered for that group are written.

use std::collections::HashMap;

use axum::{Form, Router, extract::State, response::Redirect, routing::post};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::csrf::CSRF_FIELD;
use crate::middleware::{RequireAdminAuth, require_capability, verify_csrf_token};
use crate::state::AppState;

/// Form field naming the option group.
pub const OPTION_PAGE_FIELD: &str = "option_page";

pub fn router() -> Router<AppState> {
    Router::new().route("/options", post(save_options))
}

/// Save the options of one group and return to its settings page.
///
/// POST /options
#[instrument(skip(admin, state, session, form))]
async fn save_options(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Redirect> {
    let group_name = form
        .get(OPTION_PAGE_FIELD)
        .ok_or_else(|| AppError::BadRequest("missing option_page".to_string()))?;
    let group = state
        .options()
        .group(group_name)
        .ok_or_else(|| AppError::BadRequest(format!("unknown option group: {group_name}")))?;

    require_capability(&admin, group.capability)?;

    let submitted_token = form.get(CSRF_FIELD).map(String::as_str);
    if !verify_csrf_token(&session, submitted_token).await? {
        tracing::warn!(admin_id = %admin.id, "Rejected options form with bad token");
        return Err(AppError::Forbidden("invalid form token".to_string()));
    }

    let group = state.options().save(state.settings(), group_name, &form).await?;

    tracing::info!(
        admin_id = %admin.id,
        option_group = %group_name,
        "Options saved"
    );
    Ok(Redirect::to(&format!("{}?settings-updated=true", group.page_path)))
}
