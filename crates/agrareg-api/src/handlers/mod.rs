//! HTTP request handlers.
//!
//! Handlers read the authenticated user from request extensions (inserted by
//! the auth middleware), validate their typed payloads, and call into the
//! core stores. Responses carry a `message` field on every non-2xx outcome.

pub mod auth;
pub mod dashboard;
pub mod enrollments;
pub mod farmers;
pub mod lands;
pub mod schemes;

use actix_web::{HttpMessage, HttpRequest, HttpResponse};
use agrareg_auth::AuthenticatedUser;
use agrareg_commons::{RegistryError, Role};
use serde_json::json;

pub(crate) fn bad_request(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "message": message }))
}

pub(crate) fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "message": message }))
}

/// Maps a store failure to a 500. The detail goes to the log, not the
/// client.
pub(crate) fn storage_failure(err: &RegistryError) -> HttpResponse {
    log::error!("Storage operation failed: {}", err);
    HttpResponse::InternalServerError().json(json!({ "message": "Internal server error" }))
}

/// Reads the authenticated user the middleware attached to the request.
///
/// A missing user means the route was registered outside the auth scope by
/// mistake; answer 401 rather than panic.
pub(crate) fn require_user(req: &HttpRequest) -> Result<AuthenticatedUser, HttpResponse> {
    req.extensions()
        .get::<AuthenticatedUser>()
        .cloned()
        .ok_or_else(|| {
            HttpResponse::Unauthorized().json(json!({ "message": "Authentication required" }))
        })
}

/// Like [`require_user`], additionally enforcing a role gate.
pub(crate) fn require_role(
    req: &HttpRequest,
    roles: &[Role],
) -> Result<AuthenticatedUser, HttpResponse> {
    let user = require_user(req)?;
    if !user.has_any_role(roles) {
        return Err(HttpResponse::Forbidden().json(json!({ "message": "Access denied" })));
    }
    Ok(user)
}
