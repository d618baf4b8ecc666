//! Typed entity stores over the storage backend.
//!
//! Each store owns one partition and exposes synchronous CRUD via
//! [`agrareg_store::EntityStore`] plus async wrappers that offload to the
//! blocking pool for use from HTTP handlers.

mod enrollments;
mod farmers;
mod lands;
mod schemes;
mod users;

pub use enrollments::{EnrollmentStore, StatusCounts};
pub use farmers::FarmerStore;
pub use lands::LandStore;
pub use schemes::SchemeStore;
pub use users::UserStore;

use agrareg_commons::RegistryError;
use agrareg_store::StorageError;

pub(crate) fn storage_err(e: StorageError) -> RegistryError {
    RegistryError::internal(e.to_string())
}

pub(crate) fn join_err(e: tokio::task::JoinError) -> RegistryError {
    RegistryError::internal(format!("blocking task join error: {}", e))
}
