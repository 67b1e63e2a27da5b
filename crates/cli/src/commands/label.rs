//! Checkout quantity label commands.
//!
//! # Usage
//!
//! ```bash
//! cq-cli label get
//! cq-cli label set "Seats per day"
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

use std::sync::Arc;

use checkout_quantity_core::{LabelSettings, PgSettingsStore};

use super::{CommandError, connect};

async fn labels() -> Result<LabelSettings, CommandError> {
    let pool = connect("STOREFRONT_DATABASE_URL").await?;
    Ok(LabelSettings::new(Arc::new(PgSettingsStore::new(pool))))
}

/// Print the label the storefront currently shows.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable.
pub async fn get() -> Result<(), CommandError> {
    let label = labels().await?.get_label().await;

    #[allow(clippy::print_stdout)]
    {
        println!("{label}");
    }
    Ok(())
}

/// Store a new label.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or the write fails.
pub async fn set(value: &str) -> Result<(), CommandError> {
    labels().await?.set_label(value).await?;
    tracing::info!(label = value, "Checkout quantity label updated");
    Ok(())
}
