//! RocksDB implementation of the storage backend.
//!
//! Each partition maps to a RocksDB column family. The handle uses the
//! multi-threaded mode so column families can be created through a shared
//! reference after the database is open.

use crate::storage_trait::{Operation, Partition, Result, StorageBackend, StorageError};
use rocksdb::{DBWithThreadMode, Direction, IteratorMode, MultiThreaded, Options, WriteBatch};
use std::path::{Path, PathBuf};

type Db = DBWithThreadMode<MultiThreaded>;

/// RocksDB-backed [`StorageBackend`].
pub struct RocksDbBackend {
    db: Db,
    path: PathBuf,
}

impl RocksDbBackend {
    /// Opens (or creates) a database at `path` with the given partitions.
    ///
    /// Column families present on disk but not in `partitions` are opened
    /// too; RocksDB refuses to open a database without naming all of them.
    pub fn open(path: impl AsRef<Path>, partitions: &[&str]) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let mut cf_names: Vec<String> = partitions.iter().map(|s| s.to_string()).collect();
        if let Ok(existing) = Db::list_cf(&Options::default(), &path) {
            for name in existing {
                if !cf_names.contains(&name) {
                    cf_names.push(name);
                }
            }
        }

        let db = Db::open_cf(&opts, &path, &cf_names)
            .map_err(|e| StorageError::IoError(e.to_string()))?;

        log::info!(
            "RocksDB opened at {} with {} column families",
            path.display(),
            cf_names.len()
        );

        Ok(Self { db, path })
    }

    fn cf(&self, partition: &Partition) -> Result<std::sync::Arc<rocksdb::BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(partition.name())
            .ok_or_else(|| StorageError::PartitionNotFound(partition.name().to_string()))
    }
}

impl StorageBackend for RocksDbBackend {
    fn get(&self, partition: &Partition, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let cf = self.cf(partition)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn put(&self, partition: &Partition, key: &[u8], value: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .put_cf(&cf, key, value)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn delete(&self, partition: &Partition, key: &[u8]) -> Result<()> {
        let cf = self.cf(partition)?;
        self.db
            .delete_cf(&cf, key)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn batch(&self, operations: Vec<Operation>) -> Result<()> {
        let mut batch = WriteBatch::default();
        for op in operations {
            match op {
                Operation::Put {
                    partition,
                    key,
                    value,
                } => {
                    let cf = self.cf(&partition)?;
                    batch.put_cf(&cf, key, value);
                }
                Operation::Delete { partition, key } => {
                    let cf = self.cf(&partition)?;
                    batch.delete_cf(&cf, key);
                }
            }
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn scan(
        &self,
        partition: &Partition,
        prefix: Option<&[u8]>,
        limit: Option<usize>,
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let cf = self.cf(partition)?;
        let mode = match prefix {
            Some(p) => IteratorMode::From(p, Direction::Forward),
            None => IteratorMode::Start,
        };

        let limit = limit.unwrap_or(usize::MAX);
        let mut results = Vec::new();
        for item in self.db.iterator_cf(&cf, mode) {
            let (key, value) = item.map_err(|e| StorageError::IoError(e.to_string()))?;
            // Iteration starts at the prefix but runs past it; stop at the
            // first non-matching key.
            if let Some(p) = prefix {
                if !key.starts_with(p) {
                    break;
                }
            }
            results.push((key.to_vec(), value.to_vec()));
            if results.len() >= limit {
                break;
            }
        }
        Ok(results)
    }

    fn partition_exists(&self, partition: &Partition) -> bool {
        self.db.cf_handle(partition.name()).is_some()
    }

    fn create_partition(&self, partition: &Partition) -> Result<()> {
        if self.partition_exists(partition) {
            return Ok(());
        }
        self.db
            .create_cf(partition.name(), &Options::default())
            .map_err(|e| StorageError::IoError(e.to_string()))
    }

    fn list_partitions(&self) -> Result<Vec<Partition>> {
        let names = Db::list_cf(&Options::default(), &self.path)
            .map_err(|e| StorageError::IoError(e.to_string()))?;
        Ok(names
            .into_iter()
            .filter(|n| n != "default")
            .map(Partition::new)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_test_db(partitions: &[&str]) -> (RocksDbBackend, TempDir) {
        let dir = TempDir::new().unwrap();
        let backend = RocksDbBackend::open(dir.path(), partitions).unwrap();
        (backend, dir)
    }

    #[test]
    fn test_put_get_delete() {
        let (backend, _dir) = open_test_db(&["farmers"]);
        let p = Partition::new("farmers");

        backend.put(&p, b"f1", b"doc").unwrap();
        assert_eq!(backend.get(&p, b"f1").unwrap(), Some(b"doc".to_vec()));

        backend.delete(&p, b"f1").unwrap();
        assert_eq!(backend.get(&p, b"f1").unwrap(), None);
    }

    #[test]
    fn test_unknown_partition() {
        let (backend, _dir) = open_test_db(&["farmers"]);
        let p = Partition::new("ghosts");
        assert!(matches!(
            backend.get(&p, b"x"),
            Err(StorageError::PartitionNotFound(_))
        ));
    }

    #[test]
    fn test_scan_prefix_stops_at_boundary() {
        let (backend, _dir) = open_test_db(&["lands"]);
        let p = Partition::new("lands");
        backend.put(&p, b"a1", b"1").unwrap();
        backend.put(&p, b"a2", b"2").unwrap();
        backend.put(&p, b"b1", b"3").unwrap();

        let hits = backend.scan(&p, Some(b"a"), None).unwrap();
        assert_eq!(hits.len(), 2);

        let all = backend.scan(&p, None, None).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_batch_and_create_partition() {
        let (backend, _dir) = open_test_db(&["farmers"]);
        backend.create_partition(&Partition::new("extra")).unwrap();
        // Idempotent
        backend.create_partition(&Partition::new("extra")).unwrap();

        let ops = vec![
            Operation::Put {
                partition: Partition::new("extra"),
                key: b"k1".to_vec(),
                value: b"v1".to_vec(),
            },
            Operation::Put {
                partition: Partition::new("farmers"),
                key: b"k2".to_vec(),
                value: b"v2".to_vec(),
            },
        ];
        backend.batch(ops).unwrap();

        assert_eq!(
            backend.get(&Partition::new("extra"), b"k1").unwrap(),
            Some(b"v1".to_vec())
        );
    }
}
