//! Shared types for the agrareg registry.
//!
//! This crate holds the domain models, typed identifiers, roles and error
//! types used across all agrareg crates. It stays dependency-light so that
//! every other crate can depend on it without pulling in storage or HTTP
//! machinery.

pub mod errors;
pub mod models;
pub mod storage_key;

pub use errors::{RegistryError, Result};
pub use models::{
    Address, Enrollment, EnrollmentId, EnrollmentStatus, Farmer, FarmerId, Land, LandId,
    LandLocation, Role, Scheme, SchemeEligibility, SchemeId, User, UserId, Verification,
};
pub use storage_key::StorageKey;
