//! Request middleware.

pub mod auth;

pub use auth::{extract_bearer_token, AuthMiddleware};
