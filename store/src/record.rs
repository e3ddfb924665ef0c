//! The record storage trait.

use crate::StoreError;

/// Sequential record identifier. The first record is 1; 0 is never issued.
pub type RecordId = u64;

/// Durable, ordered storage of records keyed by id.
///
/// Holds no business rules. Records are never deleted, and an update either
/// commits in full or leaves the record untouched.
pub trait RecordStore<T: Clone>: Send + Sync {
    /// Assign the next id, build the record for it and store it.
    ///
    /// Concurrent inserts never receive the same id.
    fn insert<F>(&self, build: F) -> Result<RecordId, StoreError>
    where
        F: FnOnce(RecordId) -> T;

    /// A copy of the record with this id.
    fn get(&self, id: RecordId) -> Result<T, StoreError>;

    /// Apply a state transition to one record under that record's lock.
    ///
    /// The mutator works on a copy; the copy replaces the stored record only
    /// if the mutator returns `Ok`. Updates to different records do not
    /// contend with each other.
    fn update<R, E, F>(&self, id: RecordId, mutator: F) -> Result<R, E>
    where
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>;

    /// Number of records stored.
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All record ids, ascending.
    fn ids(&self) -> Vec<RecordId>;
}
