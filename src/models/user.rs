//! Application user model.

use serde::{Deserialize, Serialize};

/// The permission level of an application user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Full access, including benefit resets and user management.
    Admin,
    /// Day-to-day payroll operation.
    Manager,
}

/// A user of the payroll application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Login name, unique regardless of case.
    pub username: String,
    /// Permission level.
    pub role: UserRole,
}

impl User {
    /// Returns true if the user may reset benefit payments.
    pub fn can_reset_benefits(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_admin_can_reset_benefits() {
        let admin = User {
            id: "u1".to_string(),
            username: "admin".to_string(),
            role: UserRole::Admin,
        };
        let manager = User {
            id: "u2".to_string(),
            username: "maria".to_string(),
            role: UserRole::Manager,
        };
        assert!(admin.can_reset_benefits());
        assert!(!manager.can_reset_benefits());
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::Manager).unwrap(), "\"manager\"");
    }
}
