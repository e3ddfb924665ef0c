//! Errors shared across crates.

use crate::address::Address;
use crate::oracle::SnapshotId;
use thiserror::Error;

/// The caller failed the authority gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("account {0} is not authorized")]
pub struct Unauthorized(pub Address);

/// A balance oracle could not answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("snapshot {0} does not exist")]
    UnknownSnapshot(SnapshotId),

    #[error("balance oracle unavailable: {0}")]
    Unavailable(String),
}
