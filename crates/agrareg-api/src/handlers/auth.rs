//! Registration, login and current-user handlers.
//!
//! These routes sit outside the auth middleware: register and login are
//! reachable without a token, and `/me` authenticates itself from the
//! Authorization header.

use crate::middleware::extract_bearer_token;
use actix_web::{web, HttpRequest, HttpResponse};
use agrareg_auth::password::{hash_password, validate_password};
use agrareg_auth::{
    authenticate_credentials, authenticate_token, create_and_sign_token, AuthError, AuthSettings,
    UserRepository,
};
use agrareg_commons::{Role, User, UserId};
use agrareg_core::AppContext;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{bad_request, storage_failure};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Public view of a user account: everything except the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            email: user.email.clone(),
        }
    }
}

/// POST /api/auth/register
///
/// Creates a worker-role account. Admin accounts are provisioned at startup
/// from configuration, not through this endpoint.
pub async fn register(
    ctx: web::Data<AppContext>,
    payload: web::Json<RegisterRequest>,
) -> HttpResponse {
    let username = payload.username.trim().to_string();
    if username.len() < 3 {
        return bad_request("Username must be at least 3 characters");
    }

    if let Err(e) = validate_password(&payload.password) {
        let msg = match e {
            AuthError::WeakPassword(msg) => msg,
            other => other.to_string(),
        };
        return bad_request(&msg);
    }

    match ctx.users.find_by_username_async(username.clone()).await {
        Ok(Some(_)) => return bad_request("Username already exists"),
        Ok(None) => {}
        Err(e) => return storage_failure(&e),
    }

    let password_hash = match hash_password(&payload.password, None).await {
        Ok(hash) => hash,
        Err(e) => {
            log::error!("Password hashing failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" }));
        }
    };

    let now = Utc::now();
    let user = User {
        id: UserId::generate(),
        username,
        password_hash,
        role: Role::Worker,
        email: payload.email.clone(),
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };

    match ctx.users.save_async(user).await {
        Ok(user) => HttpResponse::Created().json(json!({
            "message": "User registered successfully",
            "user": UserInfo::from(&user),
        })),
        Err(e) => storage_failure(&e),
    }
}

/// POST /api/auth/login
pub async fn login(
    repo: web::Data<dyn UserRepository>,
    settings: web::Data<AuthSettings>,
    payload: web::Json<LoginRequest>,
) -> HttpResponse {
    let user = match authenticate_credentials(&payload.username, &payload.password, repo.as_ref())
        .await
    {
        Ok(user) => user,
        Err(AuthError::DatabaseError(msg)) => {
            log::error!("Login failed on storage: {}", msg);
            return HttpResponse::InternalServerError()
                .json(json!({ "message": "Internal server error" }));
        }
        Err(e) => {
            log::debug!("Login rejected for '{}': {}", payload.username, e);
            return HttpResponse::Unauthorized()
                .json(json!({ "message": "Invalid username or password" }));
        }
    };

    match create_and_sign_token(&user, settings.jwt_expiry_hours, &settings.jwt_secret) {
        Ok((token, claims)) => HttpResponse::Ok().json(json!({
            "message": "Login successful",
            "access_token": token,
            "expires_at": claims.exp,
            "user": UserInfo::from(&user),
        })),
        Err(e) => {
            log::error!("Token signing failed: {}", e);
            HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
        }
    }
}

/// GET /api/auth/me
///
/// Registered outside the middleware scope alongside login, so it validates
/// the bearer token itself.
pub async fn me(
    req: HttpRequest,
    repo: web::Data<dyn UserRepository>,
    settings: web::Data<AuthSettings>,
) -> HttpResponse {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token);

    let token = match token {
        Some(t) => t,
        None => {
            return HttpResponse::Unauthorized()
                .json(json!({ "message": "Authentication required" }))
        }
    };

    match authenticate_token(token, &settings, repo.as_ref()).await {
        Ok(user) => HttpResponse::Ok().json(json!({
            "user": {
                "id": user.user_id,
                "username": user.username,
                "role": user.role,
                "email": user.email,
            }
        })),
        Err(e) => {
            log::debug!("Token rejected on /me: {}", e);
            HttpResponse::Unauthorized().json(json!({ "message": "Invalid or expired token" }))
        }
    }
}
