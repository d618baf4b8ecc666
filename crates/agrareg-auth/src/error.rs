//! Authentication error types.

use std::fmt;

/// Result alias over [`AuthError`].
pub type AuthResult<T> = std::result::Result<T, AuthError>;

/// Errors produced by the authentication layer.
///
/// The HTTP layer collapses most of these into a generic 401 so responses
/// do not leak whether a username exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Username/password pair did not verify
    InvalidCredentials(String),

    /// No account with the given username
    UserNotFound(String),

    /// Account exists but has been soft-deleted
    UserDeleted,

    /// Token signature invalid or token malformed
    InvalidToken(String),

    /// Token was valid once but has expired
    TokenExpired,

    /// Password fails the strength rules
    WeakPassword(String),

    /// bcrypt failure
    HashingError(String),

    /// Storage failure while loading the account
    DatabaseError(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidCredentials(msg) => write!(f, "Invalid credentials: {}", msg),
            AuthError::UserNotFound(msg) => write!(f, "User not found: {}", msg),
            AuthError::UserDeleted => write!(f, "User account has been deleted"),
            AuthError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            AuthError::TokenExpired => write!(f, "Token expired"),
            AuthError::WeakPassword(msg) => write!(f, "Weak password: {}", msg),
            AuthError::HashingError(msg) => write!(f, "Hashing error: {}", msg),
            AuthError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}
