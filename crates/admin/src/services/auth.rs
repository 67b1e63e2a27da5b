//! Admin authentication service.
//!
//! Admins log in with email and password. Passwords are stored as Argon2id
//! PHC strings.

use std::sync::Arc;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

use checkout_quantity_core::{AdminRole, Email, EmailError};

use crate::db::{AdminUserStore, RepositoryError};
use crate::models::{AdminUser, NewAdminUser};

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 12;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong password or unknown email. The two are not distinguished.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Hashing failed.
    #[error("failed to hash password")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Admin authentication service.
#[derive(Clone)]
pub struct AdminAuthService {
    users: Arc<dyn AdminUserStore>,
}

impl AdminAuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(users: Arc<dyn AdminUserStore>) -> Self {
        Self { users }
    }

    /// Check an email/password pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` for an unknown email or a wrong
    /// password, `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(account) = self.users.find_by_email(&email).await? else {
            tracing::info!(email = %email, "Login attempt for unknown admin");
            return Err(AuthError::InvalidCredentials);
        };

        verify_password(password, &account.password_hash)?;
        Ok(account.user)
    }

    /// Create an admin account.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` or `AuthError::WeakPassword` for bad
    /// input, `AuthError::Repository` if the email is taken or storage fails.
    pub async fn create_admin(
        &self,
        email: &str,
        name: &str,
        role: AdminRole,
        password: &str,
    ) -> Result<AdminUser, AuthError> {
        let email = Email::parse(email)?;
        validate_password(password)?;

        let user = self
            .users
            .create(NewAdminUser {
                email,
                name: name.trim().to_string(),
                role,
                password_hash: hash_password(password)?,
            })
            .await?;

        tracing::info!(admin_id = %user.id, role = %user.role, "Admin user created");
        Ok(user)
    }
}

impl std::fmt::Debug for AdminAuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAuthService").finish_non_exhaustive()
    }
}

/// Validate password strength.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
