//! Farmer store.

use super::{join_err, storage_err};
use agrareg_commons::{Farmer, FarmerId, Result};
use agrareg_store::{EntityStore, StorageBackend};
use std::sync::Arc;

/// Typed store for farmer records, keyed by [`FarmerId`].
pub struct FarmerStore {
    backend: Arc<dyn StorageBackend>,
}

impl FarmerStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<FarmerId, Farmer> for FarmerStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        "farmers"
    }
}

impl FarmerStore {
    /// All farmers, newest first.
    pub fn list_recent(&self) -> Result<Vec<Farmer>> {
        let mut farmers = self.scan_all().map_err(storage_err)?;
        farmers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(farmers)
    }

    pub async fn save_async(self: &Arc<Self>, farmer: Farmer) -> Result<Farmer> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            store.put(&farmer.id.clone(), &farmer).map_err(storage_err)?;
            Ok(farmer)
        })
        .await
        .map_err(join_err)?
    }

    pub async fn get_async(self: &Arc<Self>, id: FarmerId) -> Result<Option<Farmer>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.get(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn list_recent_async(self: &Arc<Self>) -> Result<Vec<Farmer>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_recent())
            .await
            .map_err(join_err)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agrareg_commons::{Address, Verification};
    use agrareg_store::{InMemoryBackend, Partition};
    use chrono::{Duration, Utc};

    fn store() -> Arc<FarmerStore> {
        let backend = Arc::new(InMemoryBackend::new());
        backend.create_partition(&Partition::new("farmers")).unwrap();
        Arc::new(FarmerStore::new(backend))
    }

    fn farmer(name: &str, age_days: i64) -> Farmer {
        let at = Utc::now() - Duration::days(age_days);
        Farmer {
            id: FarmerId::generate(),
            name: name.to_string(),
            phone: "9000000000".to_string(),
            aadhar: None,
            address: Address::default(),
            created_by: None,
            verified: Verification::default(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_list_recent_orders_newest_first() {
        let store = store();
        let old = farmer("old", 10);
        let new = farmer("new", 1);
        store.put(&old.id.clone(), &old).unwrap();
        store.put(&new.id.clone(), &new).unwrap();

        let listed = store.list_recent().unwrap();
        assert_eq!(listed.first().unwrap().name, "new");
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let store = store();
        let f = farmer("Ramesh", 0);
        let saved = store.save_async(f.clone()).await.unwrap();
        let got = store.get_async(saved.id.clone()).await.unwrap();
        assert_eq!(got, Some(f));
    }
}
