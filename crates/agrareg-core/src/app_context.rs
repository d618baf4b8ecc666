//! Shared application context.
//!
//! One `AppContext` is built at startup from a storage backend and handed to
//! the HTTP layer as shared app data. It owns the typed stores; nothing
//! above this module touches raw partitions.

use crate::stores::{EnrollmentStore, FarmerStore, LandStore, SchemeStore, UserStore};
use agrareg_commons::{RegistryError, Result};
use agrareg_store::{Partition, StorageBackend};
use std::sync::Arc;

/// Partitions the registry stores its entities in.
pub const PARTITIONS: &[&str] = &["farmers", "lands", "schemes", "enrollments", "users"];

/// Aggregated application state shared across HTTP workers.
pub struct AppContext {
    backend: Arc<dyn StorageBackend>,
    pub farmers: Arc<FarmerStore>,
    pub lands: Arc<LandStore>,
    pub schemes: Arc<SchemeStore>,
    pub enrollments: Arc<EnrollmentStore>,
    pub users: Arc<UserStore>,
}

impl AppContext {
    /// Creates the context over a backend, ensuring all entity partitions
    /// exist.
    pub fn init(backend: Arc<dyn StorageBackend>) -> Result<Arc<Self>> {
        for name in PARTITIONS {
            backend
                .create_partition(&Partition::new(*name))
                .map_err(|e| RegistryError::internal(e.to_string()))?;
        }

        Ok(Arc::new(Self {
            farmers: Arc::new(FarmerStore::new(backend.clone())),
            lands: Arc::new(LandStore::new(backend.clone())),
            schemes: Arc::new(SchemeStore::new(backend.clone())),
            enrollments: Arc::new(EnrollmentStore::new(backend.clone())),
            users: Arc::new(UserStore::new(backend.clone())),
            backend,
        }))
    }

    /// The underlying storage backend.
    pub fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrareg_store::InMemoryBackend;

    #[test]
    fn test_init_creates_all_partitions() {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
        let ctx = AppContext::init(backend).unwrap();

        for name in PARTITIONS {
            assert!(ctx.backend().partition_exists(&Partition::new(*name)));
        }
    }
}
