//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! # Prompts for the password on stdin
//! cq-cli admin create -e admin@example.com -n "Admin Name" -r super_admin
//!
//! # Non-interactive
//! CQ_ADMIN_PASSWORD='...' cq-cli admin create -e admin@example.com -n "Admin Name"
//! ```
//!
//! # Environment Variables
//!
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for admin database
//! - `CQ_ADMIN_PASSWORD` - Password for the new admin (skips the prompt)

use std::io::{BufRead, Write};
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use checkout_quantity_admin::db::PgAdminUserStore;
use checkout_quantity_admin::services::AdminAuthService;
use checkout_quantity_core::{AdminRole, AdminUserId};

use super::{CommandError, connect};

/// Environment variable that supplies the password non-interactively.
const PASSWORD_ENV: &str = "CQ_ADMIN_PASSWORD";

/// Create a new admin user.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `name` - Admin's display name
/// * `role` - Admin's role (`super_admin`, `admin`, or `viewer`)
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `CommandError` for an invalid role, email or password, an email
/// that is already taken, or a database failure.
pub async fn create_user(email: &str, name: &str, role: &str) -> Result<AdminUserId, CommandError> {
    let role: AdminRole = role
        .parse()
        .map_err(|_| CommandError::InvalidRole(role.to_owned()))?;

    let password = read_password()?;

    let pool = connect("ADMIN_DATABASE_URL").await?;
    let auth = AdminAuthService::new(Arc::new(PgAdminUserStore::new(pool)));

    tracing::info!("Creating admin user: {} ({})", email, role);
    let user = auth
        .create_admin(email, name, role, password.expose_secret())
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );
    Ok(user.id)
}

/// Read the password from `CQ_ADMIN_PASSWORD`, or prompt for it on stdin.
fn read_password() -> Result<SecretString, CommandError> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(SecretString::from(password));
    }

    #[allow(clippy::print_stderr)]
    {
        eprint!("Password (min 12 characters): ");
    }
    std::io::stderr().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(SecretString::from(line.trim_end_matches(['\r', '\n']).to_owned()))
}
