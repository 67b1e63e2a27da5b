//! Newtype IDs for type-safe entity references.

use serde::{Deserialize, Serialize};

/// Database ID of an admin user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(feature = "postgres", sqlx(transparent))]
#[serde(transparent)]
pub struct AdminUserId(i32);

impl AdminUserId {
    /// Create a new ID from an i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for AdminUserId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AdminUserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<AdminUserId> for i32 {
    fn from(id: AdminUserId) -> Self {
        id.0
    }
}
