//! Role and notification-type enums.

use serde::{Deserialize, Serialize};

/// Role attached to an authenticated identity.
///
/// Admin-only catalog operations (create/update/delete product) require
/// [`Role::Admin`]; everything else works for either role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Whether this role may call admin-gated catalog operations.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Kind of product alert a user can subscribe to.
///
/// The wire names (`backInStock`, `priceDrop`, `preOrder`) are part of the
/// persisted-storage layout and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NotificationType {
    BackInStock,
    PriceDrop,
    PreOrder,
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BackInStock => write!(f, "backInStock"),
            Self::PriceDrop => write!(f, "priceDrop"),
            Self::PreOrder => write!(f, "preOrder"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_roundtrip() {
        let json = serde_json::to_string(&Role::Admin).unwrap();
        assert_eq!(json, "\"admin\"");
        let parsed: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Role::Admin);
        assert!(parsed.is_admin());
        assert!(!Role::User.is_admin());
    }

    #[test]
    fn test_notification_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&NotificationType::BackInStock).unwrap(),
            "\"backInStock\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::PriceDrop).unwrap(),
            "\"priceDrop\""
        );
        assert_eq!(
            serde_json::to_string(&NotificationType::PreOrder).unwrap(),
            "\"preOrder\""
        );
    }
}
