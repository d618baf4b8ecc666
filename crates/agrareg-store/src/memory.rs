//! In-memory storage backend.
//!
//! Used by unit and integration tests, and handy for ephemeral deployments.
//! Partitions are plain BTreeMaps behind a RwLock; keys iterate in byte
//! order like the RocksDB backend.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

type PartitionMap = BTreeMap<Vec<u8>, Vec<u8>>;

/// Thread-safe in-memory implementation of [`StorageBackend`].
#[derive(Default)]
pub struct InMemoryBackend {
    partitions: RwLock<HashMap<String, PartitionMap>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned(e: impl std::fmt::Display) -> StorageError {
        StorageError::LockPoisoned(e.to_string())
    }
}

impl StorageBackend for InMemoryBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let guard = self.partitions.read().map_err(Self::poisoned)?;
        match guard.get(partition.name()) {
            Some(map) => Ok(map.get(key).cloned()),
            None => Err(StorageError::PartitionNotFound(partition.name().to_string())),
        }
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let mut guard = self.partitions.write().map_err(Self::poisoned)?;
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let mut guard = self.partitions.write().map_err(Self::poisoned)?;
        let map = guard
            .get_mut(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;
        map.remove(key);
        Ok(())
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut guard = self.partitions.write().map_err(Self::poisoned)?;

        // Validate partitions up front so the batch stays all-or-nothing.
        for op in &operations {
            let name = match op {
                Operation::Put { partition, .. } | Operation::Delete { partition, .. } => {
                    partition.name()
                }
            };
            if !guard.contains_key(name) {
                return Err(StorageError::PartitionNotFound(name.to_string()));
            }
        }

        for op in operations {
            match op {
                Operation::Put {
                    partition,
                    key,
                    value,
                } => {
                    guard
                        .get_mut(partition.name())
                        .expect("validated above")
                        .insert(key, value);
                }
                Operation::Delete { partition, key } => {
                    guard
                        .get_mut(partition.name())
                        .expect("validated above")
                        .remove(&key);
                }
            }
        }
        Ok(())
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let guard = self.partitions.read().map_err(Self::poisoned)?;
        let map = guard
            .get(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))?;

        let limit = limit.unwrap_or(usize::MAX);
        let results = map
            .iter()
            .filter(|(k, _)| prefix.map_or(true, |p| k.starts_with(p)))
            .take(limit)
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(results)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.partitions
            .read()
            .map(|g| g.contains_key(partition.name()))
            .unwrap_or(false)
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        let mut guard = self.partitions.write().map_err(Self::poisoned)?;
        guard.entry(partition.name().to_string()).or_default();
        Ok(())
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        let guard = self.partitions.read().map_err(Self::poisoned)?;
        Ok(guard.keys().map(Partition::new).collect())
    }
}
