//! Unified authentication entry points.
//!
//! Two flows share the account lookup: credential authentication for the
//! login handler and token authentication for the middleware.

use crate::context::AuthenticatedUser;
use crate::error::{AuthError, AuthResult};
use crate::jwt::validate_token;
use crate::password::verify_password;
use crate::repository::UserRepository;
use agrareg_commons::User;
use serde::{Deserialize, Serialize};

/// Authentication settings shared by the login handler and the middleware.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
}

/// Authenticates a username/password pair against the repository.
///
/// Soft-deleted accounts are treated as missing. The distinction between
/// "no such user" and "wrong password" is preserved in the error for
/// logging; the HTTP layer collapses both into a generic 401.
pub async fn authenticate_credentials(
    username: &str,
    password: &str,
    repo: &dyn UserRepository,
) -> AuthResult<User> {
    let user = repo.get_user_by_username(username).await?;

    if !user.is_active() {
        return Err(AuthError::UserDeleted);
    }

    if !verify_password(password, &user.password_hash).await? {
        log::debug!("Password verification failed for '{}'", username);
        return Err(AuthError::InvalidCredentials(format!(
            "password mismatch for '{}'",
            username
        )));
    }

    Ok(user)
}

/// Validates a bearer token and resolves it to an authenticated user.
///
/// The account is re-loaded so tokens for deleted users stop working
/// immediately rather than at expiry.
pub async fn authenticate_token(
    token: &str,
    settings: &AuthSettings,
    repo: &dyn UserRepository,
) -> AuthResult<AuthenticatedUser> {
    let claims = validate_token(token, &settings.jwt_secret)?;

    let user = repo.get_user_by_username(&claims.username).await?;
    if !user.is_active() {
        return Err(AuthError::UserDeleted);
    }

    Ok(AuthenticatedUser::new(
        user.id,
        user.username,
        user.role,
        user.email,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::create_and_sign_token;
    use crate::password::hash_password;
    use agrareg_commons::{Role, UserId};
    use chrono::Utc;
    use std::collections::HashMap;

    struct FixedRepo {
        users: HashMap<String, User>,
    }

    #[async_trait::async_trait]
    impl UserRepository for FixedRepo {
        async fn get_user_by_username(&self, username: &str) -> AuthResult<User> {
            self.users
                .get(username)
                .cloned()
                .ok_or_else(|| AuthError::UserNotFound(username.to_string()))
        }
    }

    async fn repo_with(username: &str, password: &str, deleted: bool) -> FixedRepo {
        let hash = hash_password(password, Some(4)).await.unwrap();
        let user = User {
            id: UserId::new("u1"),
            username: username.to_string(),
            password_hash: hash,
            role: Role::Worker,
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: deleted.then(Utc::now),
        };
        let mut users = HashMap::new();
        users.insert(username.to_string(), user);
        FixedRepo { users }
    }

    #[tokio::test]
    async fn test_credentials_happy_path() {
        let repo = repo_with("alice", "hunter2hunter2", false).await;
        let user = authenticate_credentials("alice", "hunter2hunter2", &repo)
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_credentials_wrong_password() {
        let repo = repo_with("alice", "hunter2hunter2", false).await;
        let err = authenticate_credentials("alice", "wrong", &repo)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[tokio::test]
    async fn test_credentials_deleted_user() {
        let repo = repo_with("alice", "hunter2hunter2", true).await;
        let err = authenticate_credentials("alice", "hunter2hunter2", &repo)
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::UserDeleted);
    }

    #[tokio::test]
    async fn test_token_flow() {
        let repo = repo_with("alice", "hunter2hunter2", false).await;
        let settings = AuthSettings {
            jwt_secret: "s3cret".to_string(),
            jwt_expiry_hours: 1,
        };
        let user = repo.get_user_by_username("alice").await.unwrap();
        let (token, _) = create_and_sign_token(&user, 1, &settings.jwt_secret).unwrap();

        let authed = authenticate_token(&token, &settings, &repo).await.unwrap();
        assert_eq!(authed.username, "alice");
        assert_eq!(authed.role, Role::Worker);
    }

    #[tokio::test]
    async fn test_token_for_unknown_user() {
        let repo = FixedRepo {
            users: HashMap::new(),
        };
        let settings = AuthSettings {
            jwt_secret: "s3cret".to_string(),
            jwt_expiry_hours: 1,
        };
        let ghost = User {
            id: UserId::new("g1"),
            username: "ghost".to_string(),
            password_hash: String::new(),
            role: Role::Worker,
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };
        let (token, _) = create_and_sign_token(&ghost, 1, &settings.jwt_secret).unwrap();

        let err = authenticate_token(&token, &settings, &repo).await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound(_)));
    }
}
