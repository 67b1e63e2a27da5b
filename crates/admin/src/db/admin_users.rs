//! Admin user storage.
//!
//! [`AdminUserStore`] is what the auth service and CLI talk to.
//! [`PgAdminUserStore`] backs it with `admin.admin_user`; queries are built at
//! runtime so the crate builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use sqlx::PgPool;

use checkout_quantity_core::{AdminRole, AdminUserId, Email};

use super::RepositoryError;
use crate::models::{AdminAccount, AdminUser, NewAdminUser};

/// Persistent storage for admin accounts.
#[async_trait]
pub trait AdminUserStore: Send + Sync {
    /// Look up an account (with its password hash) by login email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails or the row is invalid.
    async fn find_by_email(&self, email: &Email) -> Result<Option<AdminAccount>, RepositoryError>;

    /// List all admin users, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails or a row is invalid.
    async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError>;

    /// Create an admin user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email is taken, or
    /// another `RepositoryError` if the backend fails.
    async fn create(&self, user: NewAdminUser) -> Result<AdminUser, RepositoryError>;
}

// =============================================================================
// PostgreSQL
// =============================================================================

/// Internal row type for `PostgreSQL` admin user queries.
#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: i32,
    email: String,
    name: String,
    role: AdminRole,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminAccount {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            user: AdminUser {
                id: AdminUserId::new(row.id),
                email,
                name: row.name,
                role: row.role,
                created_at: row.created_at,
            },
            password_hash: row.password_hash,
        })
    }
}

/// Admin users persisted in `admin.admin_user`.
#[derive(Debug, Clone)]
pub struct PgAdminUserStore {
    pool: PgPool,
}

impl PgAdminUserStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminUserStore for PgAdminUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AdminAccount>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, email, name, role, password_hash, created_at
            FROM admin.admin_user
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(
            r"
            SELECT id, email, name, role, password_hash, created_at
            FROM admin.admin_user
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| AdminAccount::try_from(row).map(|account| account.user))
            .collect()
    }

    async fn create(&self, user: NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(
            r"
            INSERT INTO admin.admin_user (email, name, role, password_hash)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, name, role, password_hash, created_at
            ",
        )
        .bind(user.email.as_str())
        .bind(&user.name)
        .bind(user.role)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(format!("admin {} already exists", user.email))
            }
            other => RepositoryError::Database(other),
        })?;

        AdminAccount::try_from(row).map(|account| account.user)
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// In-process admin user store for tests and local runs.
#[derive(Debug, Default)]
pub struct MemoryAdminUserStore {
    accounts: RwLock<Vec<AdminAccount>>,
}

impl MemoryAdminUserStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminUserStore for MemoryAdminUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<AdminAccount>, RepositoryError> {
        Ok(self
            .accounts
            .read()
            .iter()
            .find(|account| &account.user.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        Ok(self
            .accounts
            .read()
            .iter()
            .rev()
            .map(|account| account.user.clone())
            .collect())
    }

    async fn create(&self, user: NewAdminUser) -> Result<AdminUser, RepositoryError> {
        let mut accounts = self.accounts.write();
        if accounts.iter().any(|account| account.user.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "admin {} already exists",
                user.email
            )));
        }

        let next_id = i32::try_from(accounts.len())
            .map_err(|e| RepositoryError::DataCorruption(e.to_string()))?
            + 1;
        let created = AdminUser {
            id: AdminUserId::new(next_id),
            email: user.email,
            name: user.name,
            role: user.role,
            created_at: Utc::now(),
        };
        accounts.push(AdminAccount {
            user: created.clone(),
            password_hash: user.password_hash,
        });
        Ok(created)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_user(email: &str, role: AdminRole) -> NewAdminUser {
        NewAdminUser {
            email: Email::parse(email).unwrap(),
            name: "Ops".to_string(),
            role,
            password_hash: "$argon2id$stub".to_string(),
        }
    }

    #[tokio::test]
    async fn test_memory_store_create_and_find() {
        let store = MemoryAdminUserStore::new();
        let created = store
            .create(new_user("ops@example.com", AdminRole::Admin))
            .await
            .unwrap();
        assert_eq!(created.id.as_i32(), 1);

        let found = store
            .find_by_email(&Email::parse("OPS@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.user, created);
        assert_eq!(found.password_hash, "$argon2id$stub");
    }

    #[tokio::test]
    async fn test_memory_store_rejects_duplicate_email() {
        let store = MemoryAdminUserStore::new();
        store
            .create(new_user("ops@example.com", AdminRole::Admin))
            .await
            .unwrap();
        let err = store
            .create(new_user("ops@example.com", AdminRole::Viewer))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_memory_store_lists_newest_first() {
        let store = MemoryAdminUserStore::new();
        store
            .create(new_user("a@example.com", AdminRole::Admin))
            .await
            .unwrap();
        store
            .create(new_user("b@example.com", AdminRole::Viewer))
            .await
            .unwrap();

        let emails: Vec<_> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.email.to_string())
            .collect();
        assert_eq!(emails, ["b@example.com", "a@example.com"]);
    }
}
