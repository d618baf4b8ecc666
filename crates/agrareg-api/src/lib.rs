//! HTTP API for the agrareg registry.
//!
//! Actix-web handlers, the JWT authentication middleware, and the route
//! configuration. Handlers validate typed payloads, call into
//! `agrareg-core`, and map domain errors to HTTP statuses explicitly.

pub mod handlers;
pub mod middleware;
pub mod repositories;
pub mod routes;

pub use middleware::AuthMiddleware;
pub use repositories::StoreUserRepo;
