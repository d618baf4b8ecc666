//! Storage layer for agrareg.
//!
//! Provides a `StorageBackend` trait over partitioned key-value storage, a
//! typed `EntityStore<K, V>` layered on top of it, a RocksDB implementation
//! for the server, and an in-memory implementation for tests.
//!
//! ```text
//! EntityStore<K, V>   ← typed entity CRUD (entity_store.rs)
//!     ↓
//! StorageBackend      ← generic partitioned K/V operations (storage_trait.rs)
//!     ↓
//! RocksDB / in-memory ← concrete backends
//! ```

pub mod entity_store;
pub mod memory;
pub mod rocksdb_impl;
pub mod storage_trait;

pub use entity_store::EntityStore;
pub use memory::InMemoryBackend;
pub use rocksdb_impl::RocksDbBackend;
pub use storage_trait::{
    Operation, Partition, Result, StorageBackend, StorageBackendAsync, StorageError,
};
