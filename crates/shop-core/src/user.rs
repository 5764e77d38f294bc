//! # User Types
//!
//! Purchasing users as the domain store holds them. Authentication itself
//! lives outside this engine; handlers only resolve an already
//! authenticated user id against the store.

use serde::{Deserialize, Serialize};

/// Role attached to a user record.
///
/// The role does not affect the checkout flow itself; it feeds the
/// record-visibility policy (see [`crate::policy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A purchasing user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Email address receipts are sent to
    pub email: String,

    /// Access role
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Create a new user record with the default role
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: Role::User,
        }
    }

    /// Builder: set the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_role_is_user() {
        let user = User::new("usr_1", "buyer@example.com");
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_admin_role() {
        let admin = User::new("usr_2", "ops@example.com").with_role(Role::Admin);
        assert!(admin.is_admin());
    }
}
