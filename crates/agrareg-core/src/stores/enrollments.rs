//! Enrollment store.

use super::{join_err, storage_err};
use agrareg_commons::{Enrollment, EnrollmentId, EnrollmentStatus, FarmerId, Result};
use agrareg_store::{EntityStore, StorageBackend};
use std::sync::Arc;

/// Enrollment counts per status, for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub applied: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Typed store for enrollments, keyed by [`EnrollmentId`].
pub struct EnrollmentStore {
    backend: Arc<dyn StorageBackend>,
}

impl EnrollmentStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<EnrollmentId, Enrollment> for EnrollmentStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        "enrollments"
    }
}

impl EnrollmentStore {
    /// All enrollments, newest first.
    pub fn list_recent(&self) -> Result<Vec<Enrollment>> {
        let mut enrollments = self.scan_all().map_err(storage_err)?;
        enrollments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(enrollments)
    }

    /// A farmer's enrollments, newest first.
    pub fn list_by_farmer(&self, farmer_id: &FarmerId) -> Result<Vec<Enrollment>> {
        let mut enrollments: Vec<Enrollment> = self
            .scan_all()
            .map_err(storage_err)?
            .into_iter()
            .filter(|e| &e.farmer_id == farmer_id)
            .collect();
        enrollments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(enrollments)
    }

    /// Counts per status across all enrollments.
    pub fn status_counts(&self) -> Result<StatusCounts> {
        let mut counts = StatusCounts::default();
        for enrollment in self.scan_all().map_err(storage_err)? {
            match enrollment.status {
                EnrollmentStatus::Applied => counts.applied += 1,
                EnrollmentStatus::Approved => counts.approved += 1,
                EnrollmentStatus::Rejected => counts.rejected += 1,
            }
        }
        Ok(counts)
    }

    pub async fn save_async(self: &Arc<Self>, enrollment: Enrollment) -> Result<Enrollment> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            store
                .put(&enrollment.id.clone(), &enrollment)
                .map_err(storage_err)?;
            Ok(enrollment)
        })
        .await
        .map_err(join_err)?
    }

    pub async fn get_async(self: &Arc<Self>, id: EnrollmentId) -> Result<Option<Enrollment>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.get(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn delete_async(self: &Arc<Self>, id: EnrollmentId) -> Result<()> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.delete(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn list_recent_async(self: &Arc<Self>) -> Result<Vec<Enrollment>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_recent())
            .await
            .map_err(join_err)?
    }

    pub async fn list_by_farmer_async(
        self: &Arc<Self>,
        farmer_id: FarmerId,
    ) -> Result<Vec<Enrollment>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_by_farmer(&farmer_id))
            .await
            .map_err(join_err)?
    }
}
