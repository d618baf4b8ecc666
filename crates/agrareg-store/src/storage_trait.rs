//! Storage backend abstraction for pluggable storage implementations.
//!
//! Different backends map partitions to their native concepts:
//! - RocksDB: column family
//! - In-memory: map namespace
//!
//! Scans return collected `(key, value)` pairs; the registry's partitions
//! are administrative-scale, so streaming iterators are not worth the
//! lifetime plumbing here.

use std::fmt;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    /// Partition (column family, namespace) not found
    #[error("Partition not found: {0}")]
    PartitionNotFound(String),

    /// Generic I/O error from the underlying storage
    #[error("I/O error: {0}")]
    IoError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Lock poisoning (internal concurrency issue)
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// Other errors
    #[error("Storage error: {0}")]
    Other(String),
}

/// A logical partition of data within a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    name: String,
}

impl Partition {
    /// Creates a new partition with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the partition name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Partition {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Partition {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// A single operation in an atomic batch.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Insert or update a key-value pair
    Put {
        partition: Partition,
        key: Vec<u8>,
        value: Vec<u8>,
    },

    /// Delete a key
    Delete { partition: Partition, key: Vec<u8> },
}

/// Trait for pluggable storage backend implementations.
///
/// Implementations must be thread-safe (Send + Sync) to allow concurrent
/// access from the HTTP workers.
pub trait StorageBackend: Send + Sync {
    /// Retrieves a value by key. Returns `Ok(None)` if the key is absent.
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Stores a key-value pair, overwriting any existing value.
    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Deletes a key. Idempotent: succeeds even if the key is absent.
    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Executes multiple operations atomically. All succeed or none apply.
    fn batch(&self, operations: Vec<Operation>) -> Result<()>;

    /// Scans key-value pairs in a partition, optionally filtered by key
    /// prefix and capped at `limit` entries.
    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Checks if a partition exists.
    fn partition_exists(&self, partition: &Partition) -> bool;

    /// Creates a partition. Idempotent: succeeds if it already exists.
    fn create_partition(&self, partition: &Partition) -> Result<()>;

    /// Lists all partitions known to the backend.
    fn list_partitions(&self) -> Result<Vec<Partition>>;
}

/// Async extension over `Arc<dyn StorageBackend>`.
///
/// Storage operations are synchronous; these variants offload them with
/// `tokio::task::spawn_blocking` so the actix runtime is never blocked.
#[async_trait::async_trait]
pub trait StorageBackendAsync: Send + Sync {
    /// Async version of `get()`.
    async fn get_async(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Async version of `put()`.
    async fn put_async(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()>;

    /// Async version of `delete()`.
    async fn delete_async(&self, partition: &Partition, key: &[u8]) -> Result<()>;

    /// Async version of `scan()`.
    async fn scan_async(
        &self,
        partition: &Partition,
        prefix: Option<Vec<u8>>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;
}

#[async_trait::async_trait]
impl StorageBackendAsync for std::sync::Arc<dyn StorageBackend> {
    async fn get_async(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let backend = self.clone();
        let partition = partition.clone();
        let key = key.to_vec();
        tokio::task::spawn_blocking(move || backend.get(&partition, &key))
            .await
            .map_err(|e| StorageError::Other(format!("spawn_blocking join error: {}", e)))?
    }

    async fn put_async(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let backend = self.clone();
        let partition = partition.clone();
        let key = key.to_vec();
        let value = value.to_vec();
        tokio::task::spawn_blocking(move || backend.put(&partition, &key, &value))
            .await
            .map_err(|e| StorageError::Other(format!("spawn_blocking join error: {}", e)))?
    }

    async fn delete_async(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let backend = self.clone();
        let partition = partition.clone();
        let key = key.to_vec();
        tokio::task::spawn_blocking(move || backend.delete(&partition, &key))
            .await
            .map_err(|e| StorageError::Other(format!("spawn_blocking join error: {}", e)))?
    }

    async fn scan_async(
        &self,
        partition: &Partition,
        prefix: Option<Vec<u8>>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let backend = self.clone();
        let partition = partition.clone();
        tokio::task::spawn_blocking(move || backend.scan(&partition, prefix.as_deref(), limit))
            .await
            .map_err(|e| StorageError::Other(format!("spawn_blocking join error: {}", e)))?
    }
}
