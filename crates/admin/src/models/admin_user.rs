//! Admin user domain types.

use chrono::{DateTime, Utc};

use checkout_quantity_core::{AdminRole, AdminUserId, Email};

/// An admin user (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    /// Unique admin user ID.
    pub id: AdminUserId,
    /// Admin's login email.
    pub email: Email,
    /// Admin's display name.
    pub name: String,
    /// Admin's role/permission level.
    pub role: AdminRole,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

/// An admin user together with their stored password hash.
///
/// Only the login path sees this; everything else works with [`AdminUser`].
#[derive(Clone)]
pub struct AdminAccount {
    pub user: AdminUser,
    /// Argon2 PHC string.
    pub password_hash: String,
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("user", &self.user)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Data needed to create an admin user.
#[derive(Clone)]
pub struct NewAdminUser {
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    /// Argon2 PHC string, never the plain password.
    pub password_hash: String,
}

impl std::fmt::Debug for NewAdminUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAdminUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
