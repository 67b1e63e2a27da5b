//! `PostgreSQL` settings store.
//!
//! Reads and writes the shared `settings` table. The table is created by the
//! storefront migrations; the admin binary writes to the same table.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{SettingsError, SettingsStore};

/// Settings persisted in the `settings` table.
#[derive(Debug, Clone)]
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    /// Create a store over a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
        sqlx::query_scalar::<_, String>(
            r"
            SELECT value FROM settings
            WHERE key = $1
            ",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(SettingsError::backend)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
        sqlx::query(
            r"
            INSERT INTO settings (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = $2, updated_at = NOW()
            ",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(SettingsError::backend)?;

        Ok(())
    }
}
