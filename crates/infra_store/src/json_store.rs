//! JSON-file-backed record store
//!
//! The collection lives in memory behind an async `RwLock` and serializes to
//! a single JSON array on every mutation. Writes go to a temp file, fsync,
//! then atomic rename, so a crash mid-write never corrupts the collection.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

use crate::error::StoreError;
use crate::record::Record;

/// Tuning knobs for a store instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on a single durable write
    pub write_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            write_timeout: Duration::from_secs(5),
        }
    }
}

/// Durable id-keyed collection of one entity kind
///
/// Two instances back the pipeline (users and claims, plus the activity log);
/// all share this contract. Every mutating call persists before returning
/// success.
pub struct JsonStore<R: Record> {
    path: PathBuf,
    config: StoreConfig,
    records: RwLock<HashMap<R::Id, R>>,
    row_locks: Mutex<HashMap<R::Id, Arc<Mutex<()>>>>,
}

impl<R: Record> JsonStore<R> {
    /// Opens the collection at `path`, loading any existing records
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Self::open_with(path, StoreConfig::default()).await
    }

    /// Opens the collection with explicit configuration
    pub async fn open_with(
        path: impl Into<PathBuf>,
        config: StoreConfig,
    ) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) if !bytes.is_empty() => {
                let list: Vec<R> = serde_json::from_slice(&bytes)?;
                list.into_iter().map(|r| (r.id(), r)).collect()
            }
            Ok(_) => HashMap::new(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => return Err(err.into()),
        };

        tracing::debug!(
            kind = R::KIND,
            path = %path.display(),
            count = records.len(),
            "opened record store"
        );

        Ok(Self {
            path,
            config,
            records: RwLock::new(records),
            row_locks: Mutex::new(HashMap::new()),
        })
    }

    /// Returns a full snapshot of the collection in ascending id order
    ///
    /// The returned records never alias stored state; mutating them has no
    /// effect until written back through `upsert`.
    pub async fn all(&self) -> Vec<R> {
        let map = self.records.read().await;
        let mut list: Vec<R> = map.values().cloned().collect();
        list.sort_by_key(|r| r.id());
        list
    }

    /// Returns the record with `id`, if present
    pub async fn find(&self, id: R::Id) -> Option<R> {
        self.records.read().await.get(&id).cloned()
    }

    /// Returns the record with `id` or `StoreError::NotFound`
    pub async fn get(&self, id: R::Id) -> Result<R, StoreError> {
        self.find(id)
            .await
            .ok_or_else(|| StoreError::not_found(R::KIND, id))
    }

    /// Returns the number of records in the collection
    pub async fn count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Inserts the record if its id is unseen, else replaces the record with
    /// that id in place
    ///
    /// Scoped to a single id. The write is durable before this returns; on a
    /// persistence fault the in-memory state is rolled back so no partial
    /// write is observable to other operations.
    pub async fn upsert(&self, record: R) -> Result<(), StoreError> {
        let id = record.id();
        let mut map = self.records.write().await;
        let previous = map.insert(id, record);
        if let Err(err) = self.persist(&map).await {
            match previous {
                Some(prev) => map.insert(id, prev),
                None => map.remove(&id),
            };
            return Err(err);
        }
        Ok(())
    }

    /// Bulk-replaces the entire collection
    ///
    /// Maintenance primitive only. A read-all / mutate-one / save-all cycle
    /// loses updates made by concurrent writers between the load and the
    /// save; single-entity changes must go through [`JsonStore::upsert`].
    pub async fn save_all(&self, records: Vec<R>) -> Result<(), StoreError> {
        let mut map = self.records.write().await;
        let replacement: HashMap<R::Id, R> = records.into_iter().map(|r| (r.id(), r)).collect();
        let previous = std::mem::replace(&mut *map, replacement);
        if let Err(err) = self.persist(&map).await {
            *map = previous;
            return Err(err);
        }
        Ok(())
    }

    /// Acquires the per-id lock for a read-modify-write sequence
    ///
    /// Hold the returned guard across load, validate and upsert: two
    /// concurrent sequences on the same id then serialize, while sequences on
    /// different ids proceed in parallel.
    pub async fn lock(&self, id: R::Id) -> OwnedMutexGuard<()> {
        let cell = {
            let mut locks = self.row_locks.lock().await;
            locks.entry(id).or_default().clone()
        };
        cell.lock_owned().await
    }

    async fn persist(&self, map: &HashMap<R::Id, R>) -> Result<(), StoreError> {
        let mut list: Vec<&R> = map.values().collect();
        list.sort_by_key(|r| r.id());
        let bytes = serde_json::to_vec_pretty(&list)?;

        match tokio::time::timeout(self.config.write_timeout, self.write_atomic(bytes)).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout {
                timeout_ms: self.config.write_timeout.as_millis() as u64,
            }),
        }
    }

    async fn write_atomic(&self, bytes: Vec<u8>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(&bytes).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
