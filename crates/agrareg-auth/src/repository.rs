//! User repository abstraction.
//!
//! The auth layer does not depend on the storage layer; the API crate
//! provides an adapter over the core user store.

use crate::error::AuthResult;
use agrareg_commons::User;

/// Read access to user accounts, as needed by authentication.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Loads a user by username. Errors with `UserNotFound` when absent.
    async fn get_user_by_username(&self, username: &str) -> AuthResult<User>;
}
