//! # Record Visibility Policy
//!
//! Role- and ownership-based visibility as a pure predicate, evaluated
//! per operation by the caller. A policy decision either allows the
//! operation outright, denies it, or narrows the query with an extra
//! owner-field predicate.

use crate::store::Predicate;
use crate::user::User;

/// Outcome of a policy evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// The actor sees every record
    Allow,
    /// The actor sees nothing
    Deny,
    /// The actor sees records whose owner field matches the predicate
    Restrict(Predicate),
}

/// Admins see everything; everyone else only records they own.
pub fn admin_or_self(actor: &User) -> Access {
    if actor.is_admin() {
        Access::Allow
    } else {
        Access::Restrict(Predicate::Equals(actor.id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;

    #[test]
    fn test_admin_sees_everything() {
        let admin = User::new("usr_admin", "ops@example.com").with_role(Role::Admin);
        assert_eq!(admin_or_self(&admin), Access::Allow);
    }

    #[test]
    fn test_user_restricted_to_own_records() {
        let user = User::new("usr_1", "buyer@example.com");
        match admin_or_self(&user) {
            Access::Restrict(predicate) => {
                assert!(predicate.matches("usr_1"));
                assert!(!predicate.matches("usr_2"));
            }
            other => panic!("expected Restrict, got {:?}", other),
        }
    }
}
