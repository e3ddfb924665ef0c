use crate::record::RecordId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("record {0} not found")]
    NotFound(RecordId),

    #[error("record id space exhausted")]
    CapacityExhausted,
}
