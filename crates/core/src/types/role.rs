//! Admin roles and the capabilities they grant.

use serde::{Deserialize, Serialize};

/// Admin role with different permission levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "admin_role", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Full access to all admin features including user management.
    SuperAdmin,
    /// Full access to store management features.
    Admin,
    /// Read-only access to store data.
    Viewer,
}

/// A permission checked by admin route guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Change store-wide commerce settings such as the checkout quantity label.
    ManageCommerce,
    /// Create and remove admin accounts.
    ManageAdmins,
}

impl AdminRole {
    /// Whether this role grants the given capability.
    #[must_use]
    pub const fn can(self, capability: Capability) -> bool {
        match capability {
            Capability::ManageCommerce => matches!(self, Self::SuperAdmin | Self::Admin),
            Capability::ManageAdmins => matches!(self, Self::SuperAdmin),
        }
    }
}

impl std::fmt::Display for AdminRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuperAdmin => write!(f, "super_admin"),
            Self::Admin => write!(f, "admin"),
            Self::Viewer => write!(f, "viewer"),
        }
    }
}

impl std::str::FromStr for AdminRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "super_admin" => Ok(Self::SuperAdmin),
            "admin" => Ok(Self::Admin),
            "viewer" => Ok(Self::Viewer),
            _ => Err(format!("invalid admin role: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manage_commerce_capability() {
        assert!(AdminRole::SuperAdmin.can(Capability::ManageCommerce));
        assert!(AdminRole::Admin.can(Capability::ManageCommerce));
        assert!(!AdminRole::Viewer.can(Capability::ManageCommerce));
    }

    #[test]
    fn test_manage_admins_capability() {
        assert!(AdminRole::SuperAdmin.can(Capability::ManageAdmins));
        assert!(!AdminRole::Admin.can(Capability::ManageAdmins));
    }

    #[test]
    fn test_role_round_trip_through_str() {
        for role in [AdminRole::SuperAdmin, AdminRole::Admin, AdminRole::Viewer] {
            assert_eq!(role.to_string().parse::<AdminRole>(), Ok(role));
        }
        assert!("owner".parse::<AdminRole>().is_err());
    }
}
