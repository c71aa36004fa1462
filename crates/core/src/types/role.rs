//! Account roles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid role: {0}. Valid roles: student, parent, vendor, admin")]
pub struct RoleError(pub String);

/// Account role. Each role has its own dashboard.
///
/// The role stored on the client is only a hint for which dashboard to show;
/// the API decides what the bearer token is actually allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Spends from a campus wallet at vendors and the canteen.
    Student,
    /// Funds linked students and sees their aggregated spending.
    Parent,
    /// Accepts payments from students.
    Vendor,
    /// Sees platform-wide statistics.
    Admin,
}

impl Role {
    /// All roles, in the order the dashboards are listed.
    pub const ALL: [Self; 4] = [Self::Student, Self::Parent, Self::Vendor, Self::Admin];

    /// Wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Parent => "parent",
            Self::Vendor => "vendor",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Student => "Student",
            Self::Parent => "Parent",
            Self::Vendor => "Vendor",
            Self::Admin => "Admin",
        }
    }

    /// Whether accounts with this role can be created through registration.
    #[must_use]
    pub const fn is_self_registrable(&self) -> bool {
        !matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "parent" => Ok(Self::Parent),
            "vendor" => Ok(Self::Vendor),
            "admin" => Ok(Self::Admin),
            _ => Err(RoleError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
            assert_eq!(role.to_string(), role.as_str());
        }
    }

    #[test]
    fn test_role_rejects_unknown() {
        let err = "janitor".parse::<Role>().unwrap_err();
        assert_eq!(err, RoleError("janitor".to_owned()));
        assert!(err.to_string().contains("janitor"));
    }

    #[test]
    fn test_role_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Parent).expect("serialize"),
            "\"parent\""
        );
        let role: Role = serde_json::from_str("\"vendor\"").expect("deserialize");
        assert_eq!(role, Role::Vendor);
    }

    #[test]
    fn test_admin_cannot_self_register() {
        assert!(Role::Student.is_self_registrable());
        assert!(Role::Parent.is_self_registrable());
        assert!(Role::Vendor.is_self_registrable());
        assert!(!Role::Admin.is_self_registrable());
    }
}
