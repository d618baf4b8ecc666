//! API route configuration.
//!
//! `/api/auth/*` and `/api/healthcheck` are reachable without a token; every
//! other `/api` route goes through the auth middleware. Registration order
//! matters: the open scopes are registered before the guarded catch-all.

use crate::handlers;
use crate::middleware::AuthMiddleware;
use actix_web::{web, HttpResponse};
use agrareg_auth::{AuthSettings, UserRepository};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;

pub fn configure_api(
    cfg: &mut web::ServiceConfig,
    repo: Arc<dyn UserRepository>,
    settings: AuthSettings,
) {
    cfg.app_data(web::Data::from(repo.clone()))
        .app_data(web::Data::new(settings.clone()))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(handlers::auth::register))
                        .route("/login", web::post().to(handlers::auth::login))
                        .route("/me", web::get().to(handlers::auth::me)),
                )
                .route("/healthcheck", web::get().to(healthcheck))
                .service(
                    web::scope("")
                        .wrap(AuthMiddleware::new(repo, settings))
                        .route("/farmers", web::post().to(handlers::farmers::create))
                        .route("/farmers", web::get().to(handlers::farmers::list))
                        .route(
                            "/farmers/{id}/verify",
                            web::put().to(handlers::farmers::verify),
                        )
                        .route("/farmers/{id}", web::get().to(handlers::farmers::get))
                        .route("/farmers/{id}", web::put().to(handlers::farmers::update))
                        .route("/lands", web::get().to(handlers::lands::list))
                        .route("/lands", web::post().to(handlers::lands::create))
                        .route(
                            "/lands/farmer/{farmer_id}",
                            web::get().to(handlers::lands::by_farmer),
                        )
                        .route("/lands/{id}", web::get().to(handlers::lands::get))
                        .route("/lands/{id}", web::put().to(handlers::lands::update))
                        .route("/schemes", web::post().to(handlers::schemes::create))
                        .route("/schemes", web::get().to(handlers::schemes::list))
                        .route(
                            "/schemes/eligible/{farmer_id}",
                            web::get().to(handlers::schemes::eligible),
                        )
                        .route(
                            "/schemes/{id}/toggle-status",
                            web::patch().to(handlers::schemes::toggle_status),
                        )
                        .route("/schemes/{id}", web::get().to(handlers::schemes::get))
                        .route("/schemes/{id}", web::put().to(handlers::schemes::update))
                        .route("/schemes/{id}", web::delete().to(handlers::schemes::delete))
                        .route("/enrollments", web::get().to(handlers::enrollments::list))
                        .route("/enrollments", web::post().to(handlers::enrollments::apply))
                        .route(
                            "/enrollments/farmer/{farmer_id}",
                            web::get().to(handlers::enrollments::by_farmer),
                        )
                        .route(
                            "/enrollments/{id}/status",
                            web::put().to(handlers::enrollments::update_status),
                        )
                        .route(
                            "/enrollments/{id}",
                            web::delete().to(handlers::enrollments::delete),
                        )
                        .route(
                            "/dashboard/stats",
                            web::get().to(handlers::dashboard::stats),
                        ),
                ),
        );
}

/// GET /api/healthcheck
async fn healthcheck() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "agrareg",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}
