//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront migrations (settings table, storefront sessions)
//! cq-cli migrate storefront
//!
//! # Run admin migrations (admin users, admin sessions)
//! cq-cli migrate admin
//!
//! # Run all migrations
//! cq-cli migrate all
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string for storefront
//! - `ADMIN_DATABASE_URL` - `PostgreSQL` connection string for admin
//! - `DATABASE_URL` - Fallback for either
//!
//! Storefront and admin normally share one database. Each migrator is told to
//! ignore migrations applied by the other, so the two sets can be run in any
//! order against the same `_sqlx_migrations` table.

use sqlx::migrate::Migrator;

use super::{CommandError, connect};

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn storefront() -> Result<(), CommandError> {
    let pool = connect("STOREFRONT_DATABASE_URL").await?;

    tracing::info!("Running storefront migrations...");
    run(sqlx::migrate!("../storefront/migrations"), &pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration fails.
pub async fn admin() -> Result<(), CommandError> {
    let pool = connect("ADMIN_DATABASE_URL").await?;

    tracing::info!("Running admin migrations...");
    run(sqlx::migrate!("../admin/migrations"), &pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}

async fn run(mut migrator: Migrator, pool: &sqlx::PgPool) -> Result<(), CommandError> {
    migrator.set_ignore_missing(true);
    migrator.run(pool).await?;
    Ok(())
}
