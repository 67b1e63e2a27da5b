//! CLI subcommand implementations.

pub mod admin;
pub mod label;
pub mod migrate;

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use thiserror::Error;

use checkout_quantity_admin::services::AuthError;
use checkout_quantity_core::SettingsError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0} (or DATABASE_URL)")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Invalid role name.
    #[error("Invalid role: {0}. Valid roles: super_admin, admin, viewer")]
    InvalidRole(String),

    /// Creating the admin failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Reading or writing a setting failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Reading input failed.
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect to the database named by `primary_key`, falling back to the
/// generic `DATABASE_URL`.
pub(crate) async fn connect(primary_key: &'static str) -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let url = std::env::var(primary_key)
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CommandError::MissingEnvVar(primary_key))?;

    tracing::info!(source = primary_key, "Connecting to database...");
    Ok(PgPool::connect(url.expose_secret()).await?)
}
