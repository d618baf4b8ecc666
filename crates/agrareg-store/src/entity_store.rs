//! Type-safe entity storage with generic key types.
//!
//! `EntityStore<K, V>` gives each entity type strongly-typed CRUD over a
//! `StorageBackend` partition. Keys implement [`StorageKey`] so a
//! `FarmerStore` cannot be queried with a `SchemeId` by accident; values are
//! serialized as JSON documents.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use agrareg_commons::StorageKey;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;

/// Trait for typed entity storage with automatic JSON serialization.
///
/// Implementors provide the backend handle and the partition name; CRUD
/// operations come for free.
pub trait EntityStore<K, V>
where
    K: StorageKey,
    V: Serialize + DeserializeOwned + Send + Sync,
{
    /// Returns a reference to the storage backend.
    fn backend(&self) -> &Arc<dyn StorageBackend>;

    /// Returns the partition name for this entity type.
    fn partition(&self) -> &str;

    /// Serializes an entity to bytes. Default is JSON.
    fn serialize(&self, entity: &V) -> Result<Vec<u8>> {
        serde_json::to_vec(entity).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Deserializes bytes to an entity. Default is JSON.
    fn deserialize(&self, bytes: &[u8]) -> Result<V> {
        serde_json::from_slice(bytes).map_err(|e| StorageError::SerializationError(e.to_string()))
    }

    /// Stores an entity with the given key.
    fn put(&self, key: &K, entity: &V) -> Result<()> {
        let partition = Partition::new(self.partition());
        let value = self.serialize(entity)?;
        self.backend().put(&partition, &key.storage_key(), &value)
    }

    /// Stores multiple entities atomically in a batch.
    fn batch_put(&self, entries: &[(K, V)]) -> Result<()> {
        let partition = Partition::new(self.partition());
        let operations: Result<Vec<Operation>> = entries
            .iter()
            .map(|(key, entity)| {
                let value = self.serialize(entity)?;
                Ok(Operation::Put {
                    partition: partition.clone(),
                    key: key.storage_key(),
                    value,
                })
            })
            .collect();

        self.backend().batch(operations?)
    }

    /// Retrieves an entity by key. Returns `Ok(None)` if absent.
    fn get(&self, key: &K) -> Result<Option<V>> {
        let partition = Partition::new(self.partition());
        match self.backend().get(&partition, &key.storage_key())? {
            Some(bytes) => Ok(Some(self.deserialize(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Deletes an entity by key. Idempotent.
    fn delete(&self, key: &K) -> Result<()> {
        let partition = Partition::new(self.partition());
        self.backend().delete(&partition, &key.storage_key())
    }

    /// Scans all entities in the partition.
    ///
    /// Loads everything into memory. The registry's partitions are small
    /// (administrative datasets), but a hard cap guards against runaway
    /// growth all the same.
    fn scan_all(&self) -> Result<Vec<V>> {
        const MAX_SCAN_LIMIT: usize = 100_000;
        let partition = Partition::new(self.partition());
        let pairs = self.backend().scan(&partition, None, Some(MAX_SCAN_LIMIT))?;

        if pairs.len() >= MAX_SCAN_LIMIT {
            log::warn!(
                "Scan of partition '{}' hit the {} entry cap; results truncated",
                partition,
                MAX_SCAN_LIMIT
            );
        }

        pairs
            .into_iter()
            .map(|(_, value_bytes)| self.deserialize(&value_bytes))
            .collect()
    }

    /// Counts entities in the partition.
    fn count(&self) -> Result<usize> {
        let partition = Partition::new(self.partition());
        Ok(self.backend().scan(&partition, None, None)?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryBackend;
    use agrareg_commons::FarmerId;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    struct NoteStore {
        backend: Arc<dyn StorageBackend>,
    }

    impl EntityStore<FarmerId, Note> for NoteStore {
        fn backend(&self) -> &Arc<dyn StorageBackend> {
            &self.backend
        }

        fn partition(&self) -> &str {
            "notes"
        }
    }

    fn store() -> NoteStore {
        let backend = Arc::new(InMemoryBackend::new());
        backend.create_partition(&Partition::new("notes")).unwrap();
        NoteStore { backend }
    }

    #[test]
    fn test_put_get_delete() {
        let store = store();
        let id = FarmerId::new("f1");
        let note = Note {
            text: "hello".to_string(),
        };

        store.put(&id, &note).unwrap();
        assert_eq!(store.get(&id).unwrap(), Some(note));

        store.delete(&id).unwrap();
        assert_eq!(store.get(&id).unwrap(), None);
        // Deleting again is fine
        store.delete(&id).unwrap();
    }

    #[test]
    fn test_scan_all_and_count() {
        let store = store();
        for i in 0..5 {
            let id = FarmerId::new(format!("f{}", i));
            store
                .put(
                    &id,
                    &Note {
                        text: format!("note {}", i),
                    },
                )
                .unwrap();
        }

        assert_eq!(store.count().unwrap(), 5);
        assert_eq!(store.scan_all().unwrap().len(), 5);
    }

    #[test]
    fn test_batch_put_is_atomic_success() {
        let store = store();
        let entries: Vec<(FarmerId, Note)> = (0..3)
            .map(|i| {
                (
                    FarmerId::new(format!("b{}", i)),
                    Note {
                        text: i.to_string(),
                    },
                )
            })
            .collect();
        store.batch_put(&entries).unwrap();
        assert_eq!(store.count().unwrap(), 3);
    }
}
