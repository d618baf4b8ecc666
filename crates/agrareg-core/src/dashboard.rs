//! Dashboard statistics aggregation.

use crate::app_context::AppContext;
use crate::stores::StatusCounts;
use agrareg_commons::{Enrollment, RegistryError, Result};
use agrareg_store::EntityStore;
use serde::Serialize;
use std::sync::Arc;

/// Number of recent enrollments shown on the dashboard.
const RECENT_ENROLLMENTS: usize = 5;

/// One slice of the crop distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropCount {
    pub name: String,
    pub value: usize,
}

/// Aggregated statistics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub farmers: usize,
    pub lands: usize,
    pub schemes: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
    /// Total registered land area in hectares.
    pub total_area: f64,
    pub recent: Vec<Enrollment>,
    pub crop_distribution: Vec<CropCount>,
}

/// Computes dashboard statistics from a snapshot of the stores.
pub fn compute_stats(ctx: &AppContext) -> Result<DashboardStats> {
    let storage = |e: agrareg_store::StorageError| RegistryError::internal(e.to_string());

    let farmers = ctx.farmers.count().map_err(storage)?;
    let lands = ctx.lands.count().map_err(storage)?;
    let schemes = ctx.schemes.count().map_err(storage)?;

    let StatusCounts {
        applied,
        approved,
        rejected,
    } = ctx.enrollments.status_counts()?;

    let total_area = ctx.lands.total_area()?;
    let crop_distribution = ctx
        .lands
        .crop_distribution()?
        .into_iter()
        .map(|(name, value)| CropCount { name, value })
        .collect();

    let mut recent = ctx.enrollments.list_recent()?;
    recent.truncate(RECENT_ENROLLMENTS);

    Ok(DashboardStats {
        farmers,
        lands,
        schemes,
        pending: applied,
        approved,
        rejected,
        total_area,
        recent,
        crop_distribution,
    })
}

/// Async wrapper offloading the scans to the blocking pool.
pub async fn compute_stats_async(ctx: Arc<AppContext>) -> Result<DashboardStats> {
    tokio::task::spawn_blocking(move || compute_stats(&ctx))
        .await
        .map_err(|e| RegistryError::internal(format!("blocking task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrareg_commons::{
        Enrollment, EnrollmentId, EnrollmentStatus, FarmerId, Land, LandId, LandLocation, SchemeId,
    };
    use agrareg_store::{InMemoryBackend, StorageBackend};
    use chrono::{Duration, Utc};

    fn context() -> Arc<AppContext> {
        let backend: Arc<dyn StorageBackend> = Arc::new(InMemoryBackend::new());
        AppContext::init(backend).unwrap()
    }

    #[test]
    fn test_empty_registry_stats() {
        let ctx = context();
        let stats = compute_stats(&ctx).unwrap();
        assert_eq!(stats.farmers, 0);
        assert_eq!(stats.total_area, 0.0);
        assert!(stats.recent.is_empty());
        assert!(stats.crop_distribution.is_empty());
    }

    #[test]
    fn test_counts_and_recent_truncation() {
        let ctx = context();

        for i in 0..7 {
            let at = Utc::now() - Duration::minutes(i);
            let e = Enrollment {
                id: EnrollmentId::generate(),
                farmer_id: FarmerId::new("f1"),
                land_id: LandId::new("l1"),
                scheme_id: SchemeId::new("s1"),
                status: if i % 2 == 0 {
                    EnrollmentStatus::Applied
                } else {
                    EnrollmentStatus::Approved
                },
                remarks: None,
                created_at: at,
                updated_at: at,
            };
            ctx.enrollments.put(&e.id.clone(), &e).unwrap();
        }

        let land = Land {
            id: LandId::generate(),
            farmer_id: FarmerId::new("f1"),
            survey_number: "SN-9".to_string(),
            area_hectares: 4.5,
            crop_type: Some("cotton".to_string()),
            irrigation_type: None,
            location: LandLocation::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        ctx.lands.put(&land.id.clone(), &land).unwrap();

        let stats = compute_stats(&ctx).unwrap();
        assert_eq!(stats.pending, 4);
        assert_eq!(stats.approved, 3);
        assert_eq!(stats.recent.len(), RECENT_ENROLLMENTS);
        assert_eq!(stats.total_area, 4.5);
        assert_eq!(
            stats.crop_distribution,
            vec![CropCount {
                name: "cotton".to_string(),
                value: 1
            }]
        );
    }
}
