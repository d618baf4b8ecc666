//! JWT issuing and validation.

use crate::error::{AuthError, AuthResult};
use agrareg_commons::{Role, User, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Claims carried in an agrareg access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: String,
    /// Expiry, seconds since epoch
    pub exp: i64,
    /// Issued at, seconds since epoch
    pub iat: i64,
}

impl Claims {
    /// The user id the token was issued for.
    pub fn user_id(&self) -> UserId {
        UserId::new(self.sub.clone())
    }

    /// The role claim parsed back into a [`Role`].
    pub fn parsed_role(&self) -> AuthResult<Role> {
        Role::from_str(&self.role).map_err(AuthError::InvalidToken)
    }
}

/// Creates and signs a JWT for the given user.
pub fn create_and_sign_token(
    user: &User,
    expiry_hours: i64,
    secret: &str,
) -> AuthResult<(String, Claims)> {
    let now = Utc::now();
    let claims = Claims {
        sub: user.id.as_str().to_string(),
        username: user.username.clone(),
        role: user.role.to_string(),
        exp: (now + Duration::hours(expiry_hours)).timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

    Ok((token, claims))
}

/// Validates a token signature and expiry, returning the claims.
pub fn validate_token(token: &str, secret: &str) -> AuthResult<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn user() -> User {
        User {
            id: UserId::new("u1"),
            username: "alice".to_string(),
            password_hash: String::new(),
            role: Role::Admin,
            email: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_sign_and_validate() {
        let (token, claims) = create_and_sign_token(&user(), 24, SECRET).unwrap();
        assert_eq!(claims.username, "alice");

        let decoded = validate_token(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, "u1");
        assert_eq!(decoded.parsed_role().unwrap(), Role::Admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (token, _) = create_and_sign_token(&user(), 24, SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, "other-secret"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative expiry produces an already-expired token.
        let (token, _) = create_and_sign_token(&user(), -1, SECRET).unwrap();
        assert_eq!(validate_token(&token, SECRET), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(matches!(
            validate_token("not-a-token", SECRET),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
