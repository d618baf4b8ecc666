//! Bearer-token authentication middleware.
//!
//! Extracts the `Authorization: Bearer <token>` header, validates the JWT,
//! re-loads the account, and attaches an [`AuthenticatedUser`] to the
//! request extensions. Requests that fail authentication are answered with
//! 401 before they reach a handler.
//!
//! ```rust,ignore
//! use agrareg_api::AuthMiddleware;
//! use actix_web::App;
//!
//! App::new()
//!     .wrap(AuthMiddleware::new(repo, settings))
//!     .service(my_protected_endpoint)
//! ```

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use agrareg_auth::{authenticate_token, AuthSettings, UserRepository};
use futures_util::future::LocalBoxFuture;
use log::debug;
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Authentication middleware factory.
pub struct AuthMiddleware {
    repo: Arc<dyn UserRepository>,
    settings: AuthSettings,
}

impl AuthMiddleware {
    pub fn new(repo: Arc<dyn UserRepository>, settings: AuthSettings) -> Self {
        Self { repo, settings }
    }
}

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            repo: self.repo.clone(),
            settings: self.settings.clone(),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    repo: Arc<dyn UserRepository>,
    settings: AuthSettings,
}

fn unauthorized(req: ServiceRequest, message: &str) -> ServiceResponse {
    let (req, _payload) = req.into_parts();
    let response = HttpResponse::Unauthorized().json(json!({ "message": message }));
    ServiceResponse::new(req, response)
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let repo = self.repo.clone();
        let settings = self.settings.clone();

        Box::pin(async move {
            let header = match req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
            {
                Some(h) => h.to_string(),
                None => {
                    debug!("Missing Authorization header on {}", req.path());
                    return Ok(unauthorized(req, "Authentication required"));
                }
            };

            let token = match extract_bearer_token(&header) {
                Some(t) => t.to_string(),
                None => {
                    return Ok(unauthorized(
                        req,
                        "Authorization header must be 'Bearer <token>'",
                    ));
                }
            };

            match authenticate_token(&token, &settings, repo.as_ref()).await {
                Ok(user) => {
                    debug!("Authenticated '{}' for {}", user.username, req.path());
                    req.extensions_mut().insert(user);
                    service.call(req).await
                }
                Err(e) => {
                    debug!("Token rejected on {}: {}", req.path(), e);
                    Ok(unauthorized(req, "Invalid or expired token"))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(extract_bearer_token("Bearer   spaced  "), Some("spaced"));
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token("Basic dXNlcjpwdw=="), None);
        assert_eq!(extract_bearer_token("bearer abc"), None);
    }
}
