//! Scheme store.

use super::{join_err, storage_err};
use agrareg_commons::{Result, Scheme, SchemeId};
use agrareg_store::{EntityStore, StorageBackend};
use std::sync::Arc;

/// Typed store for welfare schemes, keyed by [`SchemeId`].
pub struct SchemeStore {
    backend: Arc<dyn StorageBackend>,
}

impl SchemeStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }
}

impl EntityStore<SchemeId, Scheme> for SchemeStore {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        "schemes"
    }
}

impl SchemeStore {
    /// Finds a scheme by its (uppercase) code, optionally excluding one id.
    ///
    /// The exclusion supports update flows: "another scheme with this code
    /// exists" must not match the scheme being updated.
    pub fn find_by_code(&self, code: &str, exclude: Option<&SchemeId>) -> Result<Option<Scheme>> {
        let schemes = self.scan_all().map_err(storage_err)?;
        Ok(schemes.into_iter().find(|s| {
            s.scheme_code == code && exclude.map_or(true, |id| &s.id != id)
        }))
    }

    /// Schemes filtered by active flag and district, newest first.
    ///
    /// The district filter matches schemes with no district restriction as
    /// well as those explicitly allowing the district.
    pub fn list_filtered(
        &self,
        active: Option<bool>,
        district: Option<&str>,
    ) -> Result<Vec<Scheme>> {
        let mut schemes: Vec<Scheme> = self
            .scan_all()
            .map_err(storage_err)?
            .into_iter()
            .filter(|s| active.map_or(true, |a| s.is_active == a))
            .filter(|s| {
                district.map_or(true, |d| {
                    s.eligibility.allowed_districts.is_empty()
                        || s.eligibility.allowed_districts.iter().any(|x| x == d)
                })
            })
            .collect();
        schemes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(schemes)
    }

    /// The active scheme catalog in registration order (oldest first).
    /// This is the stable order the eligibility evaluator preserves.
    pub fn active_catalog(&self) -> Result<Vec<Scheme>> {
        let mut schemes: Vec<Scheme> = self
            .scan_all()
            .map_err(storage_err)?
            .into_iter()
            .filter(|s| s.is_active)
            .collect();
        schemes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(schemes)
    }

    pub async fn save_async(self: &Arc<Self>, scheme: Scheme) -> Result<Scheme> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || {
            store.put(&scheme.id.clone(), &scheme).map_err(storage_err)?;
            Ok(scheme)
        })
        .await
        .map_err(join_err)?
    }

    pub async fn get_async(self: &Arc<Self>, id: SchemeId) -> Result<Option<Scheme>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.get(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn delete_async(self: &Arc<Self>, id: SchemeId) -> Result<()> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.delete(&id).map_err(storage_err))
            .await
            .map_err(join_err)?
    }

    pub async fn find_by_code_async(
        self: &Arc<Self>,
        code: String,
        exclude: Option<SchemeId>,
    ) -> Result<Option<Scheme>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.find_by_code(&code, exclude.as_ref()))
            .await
            .map_err(join_err)?
    }

    pub async fn list_filtered_async(
        self: &Arc<Self>,
        active: Option<bool>,
        district: Option<String>,
    ) -> Result<Vec<Scheme>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.list_filtered(active, district.as_deref()))
            .await
            .map_err(join_err)?
    }

    pub async fn active_catalog_async(self: &Arc<Self>) -> Result<Vec<Scheme>> {
        let store = Arc::clone(self);
        tokio::task::spawn_blocking(move || store.active_catalog())
            .await
            .map_err(join_err)?
    }
}
