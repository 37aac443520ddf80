//! Caller-supplied session context.
//!
//! Sign-in is handled by an external identity provider; the store only
//! needs the resulting user email.

use crate::error::{RolezinhosError, RolezinhosResult};
use crate::event::Role;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<String>,
}

impl Session {
    pub fn anonymous() -> Self {
        Session { user: None }
    }

    pub fn signed_in(email: impl Into<String>) -> Self {
        Session {
            user: Some(email.into()),
        }
    }

    /// The signed-in user, or `SignInRequired` naming the attempted action.
    pub fn require_user(&self, action: &'static str) -> RolezinhosResult<&str> {
        self.user
            .as_deref()
            .ok_or(RolezinhosError::SignInRequired(action))
    }

    /// Whether this session may edit or delete `role`.
    ///
    /// Records without a creator (seed data) are open to any signed-in user.
    pub fn can_modify(&self, role: &Role) -> bool {
        match &self.user {
            None => false,
            Some(_) if role.creator.is_none() => true,
            Some(user) => role.is_owned_by(user),
        }
    }

    /// `SignInRequired` when anonymous, `PermissionDenied` when `role`
    /// belongs to someone else.
    pub fn ensure_can_modify(&self, role: &Role, action: &'static str) -> RolezinhosResult<()> {
        self.require_user(action)?;
        if self.can_modify(role) {
            Ok(())
        } else {
            Err(RolezinhosError::PermissionDenied(format!(
                "'{}' belongs to another user",
                role.name
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ownership_rules() {
        let mut role = Role::new("A");
        let alice = Session::signed_in("alice@example.com");
        let bob = Session::signed_in("bob@example.com");

        assert!(alice.can_modify(&role));
        assert!(!Session::anonymous().can_modify(&role));

        role.creator = Some("alice@example.com".to_string());
        assert!(alice.can_modify(&role));
        assert!(!bob.can_modify(&role));
    }

    #[test]
    fn ensure_can_modify_reports_the_reason() {
        let mut role = Role::new("Calourada");
        role.creator = Some("alice@example.com".to_string());

        assert!(
            Session::signed_in("alice@example.com")
                .ensure_can_modify(&role, "delete events")
                .is_ok()
        );
        assert!(matches!(
            Session::signed_in("bob@example.com").ensure_can_modify(&role, "delete events"),
            Err(RolezinhosError::PermissionDenied(_))
        ));
        assert!(matches!(
            Session::anonymous().ensure_can_modify(&role, "delete events"),
            Err(RolezinhosError::SignInRequired("delete events"))
        ));
    }

    #[test]
    fn require_user_names_the_action() {
        let err = Session::anonymous().require_user("create events").unwrap_err();
        assert_eq!(err.to_string(), "Sign in to create events");
    }
}
