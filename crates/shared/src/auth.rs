//! Authentication types for the authorization gate.
//!
//! Mizan does not issue tokens itself; an upstream identity service does.
//! This module only defines what the gate extracts from a validated token:
//! the acting user and their role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User roles observed by the core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access to all financial operations.
    Manager,
    /// Full access to all financial operations.
    AccountingManager,
    /// Read access restricted to assigned projects and responsible treasuries.
    Engineer,
}

impl Role {
    /// Returns true if this role may perform financial mutations.
    #[must_use]
    pub const fn can_mutate_finances(self) -> bool {
        matches!(self, Self::Manager | Self::AccountingManager)
    }

    /// Returns the wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manager => "manager",
            Self::AccountingManager => "accounting_manager",
            Self::Engineer => "engineer",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manager" => Ok(Self::Manager),
            "accounting_manager" => Ok(Self::AccountingManager),
            "engineer" => Ok(Self::Engineer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT claims for access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// User's role.
    pub role: Role,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a user.
    #[must_use]
    pub fn new(user_id: Uuid, role: Role, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> Uuid {
        self.sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(Role::Manager, "manager", true)]
    #[case(Role::AccountingManager, "accounting_manager", true)]
    #[case(Role::Engineer, "engineer", false)]
    fn test_role_round_trip(#[case] role: Role, #[case] wire: &str, #[case] mutates: bool) {
        assert_eq!(role.as_str(), wire);
        assert_eq!(Role::from_str(wire).unwrap(), role);
        assert_eq!(role.can_mutate_finances(), mutates);
    }

    #[test]
    fn test_role_from_str_rejects_unknown() {
        assert!(Role::from_str("intern").is_err());
    }

    #[test]
    fn test_claims_expiry_ordering() {
        let expires_at = Utc::now() + chrono::Duration::minutes(15);
        let claims = Claims::new(Uuid::new_v4(), Role::Manager, expires_at);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.user_id(), claims.sub);
    }
}
