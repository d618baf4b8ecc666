//! Password hashing and validation.

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Bcrypt cost factor for password hashing.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool since bcrypt is CPU-intensive.
/// `cost` defaults to [`BCRYPT_COST`]; tests pass a lower value.
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch.
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate that a password meets the strength rules.
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the tests fast; production uses BCRYPT_COST.
    const TEST_COST: u32 = 4;

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("long-enough-pass").is_ok());
        assert!(validate_password(&"x".repeat(73)).is_err());
        assert!(validate_password(&"x".repeat(72)).is_ok());
    }

    #[tokio::test]
    async fn test_hash_and_verify_round_trip() {
        let hash = hash_password("correct horse", Some(TEST_COST)).await.unwrap();
        assert!(verify_password("correct horse", &hash).await.unwrap());
        assert!(!verify_password("wrong horse", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let h1 = hash_password("same password", Some(TEST_COST)).await.unwrap();
        let h2 = hash_password("same password", Some(TEST_COST)).await.unwrap();
        assert_ne!(h1, h2);
    }
}
