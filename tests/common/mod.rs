//! Shared helpers for HTTP integration tests.
//!
//! Each test builds an isolated in-memory registry and drives the real
//! route configuration, middleware included.

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use agrareg_api::{routes, StoreUserRepo};
use agrareg_auth::{create_and_sign_token, AuthSettings, UserRepository};
use agrareg_commons::{Role, User, UserId};
use agrareg_core::AppContext;
use agrareg_store::{EntityStore, InMemoryBackend, StorageBackend};
use chrono::Utc;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret";

pub fn test_settings() -> AuthSettings {
    AuthSettings {
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiry_hours: 1,
    }
}

pub fn test_context() -> Arc<AppContext> {
    let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
    AppContext::init(backend).expect("context init")
}

/// Builds the full application over the given context.
pub async fn init_app(
    ctx: Arc<AppContext>,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    let repo: Arc<dyn UserRepository> = Arc::new(StoreUserRepo::new(ctx.users.clone()));
    let settings = test_settings();
    test::init_service(
        App::new()
            .app_data(web::Data::from(ctx))
            .configure(move |cfg| routes::configure_api(cfg, repo, settings)),
    )
    .await
}

/// Stores a user with the given role and returns it with a signed token.
///
/// The password hash is a placeholder; token authentication never checks it.
pub fn seed_user(ctx: &Arc<AppContext>, username: &str, role: Role) -> (User, String) {
    let now = Utc::now();
    let user = User {
        id: UserId::generate(),
        username: username.to_string(),
        password_hash: "$2b$04$placeholder".to_string(),
        role,
        email: None,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    };
    ctx.users.put(&user.id.clone(), &user).expect("seed user");

    let (token, _) = create_and_sign_token(&user, 1, TEST_SECRET).expect("sign token");
    (user, token)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
