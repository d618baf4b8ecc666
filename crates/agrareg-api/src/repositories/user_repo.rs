use std::sync::Arc;

use agrareg_auth::{AuthError, AuthResult, UserRepository};
use agrareg_commons::User;
use agrareg_core::stores::UserStore;

/// Repository adapter backed by the core [`UserStore`].
pub struct StoreUserRepo {
    users: Arc<UserStore>,
}

impl StoreUserRepo {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }
}

#[async_trait::async_trait]
impl UserRepository for StoreUserRepo {
    async fn get_user_by_username(&self, username: &str) -> AuthResult<User> {
        let username = username.to_string();
        let users = self.users.clone();
        tokio::task::spawn_blocking(move || {
            users
                .find_by_username(&username)
                .map_err(|e| AuthError::DatabaseError(e.to_string()))?
                .ok_or_else(|| AuthError::UserNotFound(format!("User '{}' not found", username)))
        })
        .await
        .map_err(|e| AuthError::DatabaseError(e.to_string()))?
    }
}
