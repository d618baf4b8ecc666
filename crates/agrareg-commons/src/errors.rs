//! Shared error types for agrareg.
//!
//! Provides a common error enum usable across all agrareg crates without
//! introducing external dependencies.

use std::fmt;

/// Result alias over [`RegistryError`].
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Common error type for registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Invalid input provided by a caller
    InvalidInput(String),

    /// Record not found (farmer, land, scheme, enrollment, user)
    NotFound(String),

    /// Record already exists (duplicate creation)
    AlreadyExists(String),

    /// Operation not permitted for the caller's role
    PermissionDenied(String),

    /// Internal error (storage failure, unexpected state)
    Internal(String),
}

impl RegistryError {
    /// Creates an InvalidInput error with a message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a NotFound error with a message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates an AlreadyExists error with a message.
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Self::AlreadyExists(msg.into())
    }

    /// Creates a PermissionDenied error with a message.
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied(msg.into())
    }

    /// Creates an Internal error with a message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            RegistryError::NotFound(msg) => write!(f, "Not found: {}", msg),
            RegistryError::AlreadyExists(msg) => write!(f, "Already exists: {}", msg),
            RegistryError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            RegistryError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}
