//! Boundary to the fungible token ledger that voting power is derived from.
//!
//! The ledger itself (transfers, allowances, minting) lives outside the
//! engines. They only ever read balances through [`BalanceOracle`].

use crate::address::Address;
use crate::amount::TokenAmount;
use crate::error::OracleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a point-in-time balance snapshot taken by the oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(u64);

impl SnapshotId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of an account's token balance.
pub trait BalanceOracle: Send + Sync {
    /// Balance of `account`, either now (`None`) or as frozen by `snapshot`.
    ///
    /// Unknown accounts hold zero; only an unknown snapshot is an error.
    fn balance_of(
        &self,
        account: &Address,
        snapshot: Option<SnapshotId>,
    ) -> Result<TokenAmount, OracleError>;

    /// Freeze every balance as it is right now and return a handle to it.
    fn snapshot(&self) -> Result<SnapshotId, OracleError>;
}
