//! Land store.

use super::{join_err, storage_err};
use agrareg_commons::{FarmerId, Land, LandId, Result};
use agrareg_store::{EntityStore, StorageBackend};
use std::collections::HashMap;
use std::sync::Arc;

/// Typed store for land parcels, keyed by [`LandId`].
pub struct LandStore {
    backend: Arc<dyn StorageBackend>,
}

impl LandStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<LandId, Land> for LandStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        "lands"
    }
}

impl LandStore {
    /// All land parcels, newest first.
    pub fn list_recent(&self) -> Result<Vec<Land>> {
        let mut lands = self.scan_all().map_err(storage_err)?;
        lands.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lands)
    }

    /// A farmer's holdings, registration order (oldest first).
    pub fn list_by_farmer(&self, farmer_id: &FarmerId) -> Result<Vec<Land>> {
        let mut lands: Vec<Land> = self
            .scan_all()
            .map_err(storage_err)?
            .into_iter()
            .filter(|l| &l.farmer_id == farmer_id)
            .collect();
        lands.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(lands)
    }

    /// Total registered area across all parcels, in hectares.
    pub fn total_area(&self) -> Result<f64> {
        Ok(self
            .scan_all()
            .map_err(storage_err)?
            .iter()
            .map(|l| l.area_hectares)
            .sum())
    }

    /// Plot counts per crop type, most common first. Parcels without a crop
    /// type are skipped.
    pub fn crop_distribution(&self) -> Result<Vec<(String, usize)>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for land in self.scan_all().map_err(storage_err)? {
            if let Some(crop) = land.crop_type {
                *counts.entry(crop).or_insert(0) += 1;
            }
        }
        let mut distribution: Vec<(String, usize)> = counts.into_iter().collect();
        distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(distribution)
    }

    pub async fn save_async(self: &Arc<Self>, land: Land) -> Result<Land> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            store.put(&land.id.clone(), &land).map_err(storage_err)?;
            Ok(land)
        })
        .await
        .map_err(join_err)?
    }

    pub async fn get_async(self: &Arc<Self>, id: LandId) -> Result<Option<Land>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.get(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn list_recent_async(self: &Arc<Self>) -> Result<Vec<Land>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_recent())
            .await
            .map_err(join_err)?
    }

    pub async fn list_by_farmer_async(self: &Arc<Self>, farmer_id: FarmerId) -> Result<Vec<Land>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_by_farmer(&farmer_id))
            .await
            .map_err(join_err)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrareg_commons::LandLocation;
    use agrareg_store::{InMemoryBackend, Partition};
    use chrono::{Duration, Utc};

    fn store() -> Arc<LandStore> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.create_partition(&Partition::new("lands")).unwrap();
        Arc::new(LandStore::new(backend))
    }

    fn land(farmer: &str, area: f64, crop: Option<&str>, age_days: i64) -> Land {
        let at = Utc::now() - Duration::days(age_days);
        Land {
            id: LandId::generate(),
            farmer_id: FarmerId::new(farmer),
            survey_number: "SN-1".to_string(),
            area_hectares: area,
            crop_type: crop.map(|c| c.to_string()),
            irrigation_type: None,
            location: LandLocation::default(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_list_by_farmer_filters_and_orders() {
        let store = store();
        let l1 = land("f1", 1.0, None, 3);
        let l2 = land("f1", 2.0, None, 1);
        let other = land("f2", 4.0, None, 2);
        for l in [&l1, &l2, &other] {
            store.put(&l.id.clone(), l).unwrap();
        }

        let holdings = store.list_by_farmer(&FarmerId::new("f1")).unwrap();
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].id, l1.id); // oldest first
        assert_eq!(holdings[1].id, l2.id);
    }

    #[test]
    fn test_total_area_and_crop_distribution() {
        let store = store();
        for l in [
            land("f1", 1.5, Some("wheat"), 0),
            land("f2", 2.5, Some("wheat"), 0),
            land("f3", 3.0, Some("rice"), 0),
            land("f4", 1.0, None, 0),
        ] {
            store.put(&l.id.clone(), &l).unwrap();
        }

        assert!((store.total_area().unwrap() - 8.0).abs() < f64::EPSILON);

        let dist = store.crop_distribution().unwrap();
        assert_eq!(dist[0], ("wheat".to_string(), 2));
        assert_eq!(dist[1], ("rice".to_string(), 1));
    }
}
