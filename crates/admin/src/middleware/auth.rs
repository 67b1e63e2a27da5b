//! Authentication middleware and extractors for admin.
//!
//! Provides extractors for requiring admin authentication in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use checkout_quantity_core::Capability;

use crate::error::AppError;
use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires admin authentication.
///
/// If the admin is not logged in, redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminAuth(admin): RequireAdminAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdminAuth(pub CurrentAdmin);

/// Error returned when admin authentication is required but the user is not logged in.
#[derive(Debug)]
pub enum AdminAuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// No session layer on this route.
    MissingSession,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/auth/login").into_response(),
            Self::MissingSession => {
                tracing::error!("Session not found in request extensions");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminAuth
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection::MissingSession)?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or(AdminAuthRejection::RedirectToLogin)?;

        Ok(Self(admin))
    }
}

/// Check that the logged-in admin holds `capability`.
///
/// # Errors
///
/// Returns `AppError::Forbidden` if the admin's role lacks the capability.
pub fn require_capability(admin: &CurrentAdmin, capability: Capability) -> Result<(), AppError> {
    if admin.can(capability) {
        Ok(())
    } else {
        tracing::warn!(
            admin_id = %admin.id,
            role = %admin.role,
            ?capability,
            "Admin lacks capability"
        );
        Err(AppError::Forbidden(
            "You do not have permission to manage these settings".to_string(),
        ))
    }
}

/// Helper to set the current admin in the session.
///
/// The session ID is rotated first so a pre-login session cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Helper to clear the session on logout.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use checkout_quantity_core::{AdminRole, AdminUserId, Email};

    use super::*;

    fn admin(role: AdminRole) -> CurrentAdmin {
        CurrentAdmin {
            id: AdminUserId::new(7),
            email: Email::parse("ops@example.com").unwrap(),
            name: "Ops".to_string(),
            role,
        }
    }

    #[test]
    fn test_commerce_capability_by_role() {
        assert!(require_capability(&admin(AdminRole::SuperAdmin), Capability::ManageCommerce).is_ok());
        assert!(require_capability(&admin(AdminRole::Admin), Capability::ManageCommerce).is_ok());
        assert!(matches!(
            require_capability(&admin(AdminRole::Viewer), Capability::ManageCommerce),
            Err(AppError::Forbidden(_))
        ));
    }
}
