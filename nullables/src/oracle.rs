//! Nullable balance oracle: an in-memory token ledger with snapshots.

use parking_lot::RwLock;
use std::collections::HashMap;
use yideng_types::{Address, BalanceOracle, OracleError, SnapshotId, TokenAmount};

#[derive(Default)]
struct Ledger {
    balances: HashMap<Address, TokenAmount>,
    /// Frozen copies of `balances`; snapshot id n lives at index n - 1.
    snapshots: Vec<HashMap<Address, TokenAmount>>,
    unavailable: Option<String>,
}

/// Balances set directly by the test, frozen on demand.
#[derive(Default)]
pub struct NullBalanceOracle {
    ledger: RwLock<Ledger>,
}

impl NullBalanceOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with initial balances.
    pub fn with_balances<I, A>(balances: I) -> Self
    where
        I: IntoIterator<Item = (A, u128)>,
        A: Into<Address>,
    {
        let oracle = Self::new();
        for (account, raw) in balances {
            oracle.set_balance(&account.into(), raw);
        }
        oracle
    }

    /// Overwrite the live balance of `account`. Existing snapshots are unaffected.
    pub fn set_balance(&self, account: &Address, raw: u128) {
        self.ledger
            .write()
            .balances
            .insert(account.clone(), TokenAmount::new(raw));
    }

    /// Number of snapshots taken so far.
    pub fn snapshot_count(&self) -> usize {
        self.ledger.read().snapshots.len()
    }

    /// Make every subsequent call fail with `OracleError::Unavailable`.
    pub fn fail_with(&self, reason: impl Into<String>) {
        self.ledger.write().unavailable = Some(reason.into());
    }

    /// Undo [`fail_with`](Self::fail_with).
    pub fn recover(&self) {
        self.ledger.write().unavailable = None;
    }
}

impl BalanceOracle for NullBalanceOracle {
    fn balance_of(
        &self,
        account: &Address,
        snapshot: Option<SnapshotId>,
    ) -> Result<TokenAmount, OracleError> {
        let ledger = self.ledger.read();
        if let Some(reason) = &ledger.unavailable {
            return Err(OracleError::Unavailable(reason.clone()));
        }
        let balances = match snapshot {
            None => &ledger.balances,
            Some(id) => id
                .as_u64()
                .checked_sub(1)
                .and_then(|idx| ledger.snapshots.get(idx as usize))
                .ok_or(OracleError::UnknownSnapshot(id))?,
        };
        Ok(balances.get(account).copied().unwrap_or(TokenAmount::ZERO))
    }

    fn snapshot(&self) -> Result<SnapshotId, OracleError> {
        let mut ledger = self.ledger.write();
        if let Some(reason) = &ledger.unavailable {
            return Err(OracleError::Unavailable(reason.clone()));
        }
        let frozen = ledger.balances.clone();
        ledger.snapshots.push(frozen);
        Ok(SnapshotId::new(ledger.snapshots.len() as u64))
    }
}
