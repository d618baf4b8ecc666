//! Request-scoped authenticated user context.

use agrareg_commons::{Role, UserId};

/// The authenticated caller of a request.
///
/// Built by the HTTP middleware from a validated token and inserted into the
/// request extensions; handlers read it from there. There is no global
/// session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub username: String,
    pub role: Role,
    pub email: Option<String>,
}

impl AuthenticatedUser {
    pub fn new(user_id: UserId, username: String, role: Role, email: Option<String>) -> Self {
        Self {
            user_id,
            username,
            role,
            email,
        }
    }

    /// True when the caller holds one of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_any_role() {
        let user = AuthenticatedUser::new(
            UserId::new("u1"),
            "alice".to_string(),
            Role::Worker,
            None,
        );
        assert!(user.has_any_role(&[Role::Admin, Role::Worker]));
        assert!(!user.has_any_role(&[Role::Admin]));
    }
}
