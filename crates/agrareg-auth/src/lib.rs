//! Authentication for the agrareg registry.
//!
//! Provides password hashing (bcrypt), JWT issuing and validation, the
//! request-scoped [`AuthenticatedUser`] context, and the unified
//! authentication entry points used by the login handler and the HTTP
//! middleware.

pub mod context;
pub mod error;
pub mod jwt;
pub mod password;
pub mod repository;
pub mod service;

pub use context::AuthenticatedUser;
pub use error::{AuthError, AuthResult};
pub use jwt::{create_and_sign_token, validate_token, Claims};
pub use repository::UserRepository;
pub use service::{authenticate_credentials, authenticate_token, AuthSettings};
