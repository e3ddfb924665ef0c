//! In-memory record store.
//!
//! Each record sits behind its own mutex; the map lock is only held long
//! enough to find (or add) a record, so work on different records proceeds
//! in parallel.

use crate::record::{RecordId, RecordStore};
use crate::StoreError;
use parking_lot::{Mutex, RwLock};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub struct MemoryStore<T> {
    /// Last id handed out (0 before the first insert).
    last_id: AtomicU64,
    records: RwLock<BTreeMap<RecordId, Arc<Mutex<T>>>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::resume_after(0)
    }

    /// An empty store whose id counter starts at `last_id`, so the first
    /// insert receives `last_id + 1`.
    pub fn resume_after(last_id: RecordId) -> Self {
        Self {
            last_id: AtomicU64::new(last_id),
            records: RwLock::new(BTreeMap::new()),
        }
    }

    fn allocate_id(&self) -> Result<RecordId, StoreError> {
        self.last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| last.checked_add(1))
            .map(|prev| prev + 1)
            .map_err(|_| StoreError::CapacityExhausted)
    }

    fn record(&self, id: RecordId) -> Result<Arc<Mutex<T>>, StoreError> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send> RecordStore<T> for MemoryStore<T> {
    fn insert<F>(&self, build: F) -> Result<RecordId, StoreError>
    where
        F: FnOnce(RecordId) -> T,
    {
        // Allocate under the map lock so id n is visible before id n + 1.
        let mut records = self.records.write();
        let id = self.allocate_id()?;
        records.insert(id, Arc::new(Mutex::new(build(id))));
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<T, StoreError> {
        let record = self.record(id)?;
        let guard = record.lock();
        Ok(guard.clone())
    }

    fn update<R, E, F>(&self, id: RecordId, mutator: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let record = self.record(id)?;
        let mut guard = record.lock();
        let mut working = guard.clone();
        let out = mutator(&mut working)?;
        *guard = working;
        Ok(out)
    }

    fn len(&self) -> u64 {
        self.records.read().len() as u64
    }

    fn ids(&self) -> Vec<RecordId> {
        self.records.read().keys().copied().collect()
    }
}
