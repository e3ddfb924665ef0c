//! Credential registry: mints and answers queries about badges.

use crate::badge::{Badge, BadgeMetadata, TokenId};
use crate::error::CredentialError;
use crate::token::NonFungibleToken;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use yideng_store::{MemoryStore, RecordStore};
use yideng_types::{Address, AuthorityGate, Clock};

/// Registry of minted badges.
///
/// Badges are append-only records; the owner index is updated in the same
/// critical section as the insert, so `balance_of` never lags a mint that
/// has returned.
pub struct CredentialRegistry<S = MemoryStore<Badge>> {
    store: S,
    /// Owner → token ids in mint order.
    owners: RwLock<HashMap<Address, Vec<TokenId>>>,
    clock: Arc<dyn Clock>,
    authority: AuthorityGate,
}

impl CredentialRegistry {
    /// Registry backed by an in-memory badge store.
    pub fn new(clock: Arc<dyn Clock>, authority: AuthorityGate) -> Self {
        Self::with_store(MemoryStore::new(), clock, authority)
    }
}

impl<S: RecordStore<Badge>> CredentialRegistry<S> {
    pub fn with_store(store: S, clock: Arc<dyn Clock>, authority: AuthorityGate) -> Self {
        Self {
            store,
            owners: RwLock::new(HashMap::new()),
            clock,
            authority,
        }
    }

    /// Mint a badge for `recipient`. Only the administrator may call this.
    ///
    /// Nothing is allocated until every check has passed, so a rejected
    /// mint never consumes a token id.
    pub fn mint_badge(
        &self,
        caller: &Address,
        recipient: &Address,
        metadata: BadgeMetadata,
    ) -> Result<TokenId, CredentialError> {
        let now = self.clock.now();

        if let Err(e) = self.authority.require_authorized(caller) {
            tracing::warn!(caller = %caller, "badge mint refused: not the administrator");
            return Err(e.into());
        }
        if recipient.is_empty() {
            return Err(CredentialError::InvalidInput(
                "recipient address must not be empty".into(),
            ));
        }
        metadata.validate()?;

        let mut owners = self.owners.write();
        let course = metadata.course_name.clone();
        let token_id = self.store.insert(|token_id| Badge {
            token_id,
            owner: recipient.clone(),
            metadata,
            issued_at: now,
        })?;
        owners.entry(recipient.clone()).or_default().push(token_id);
        drop(owners);

        tracing::info!(
            token_id,
            recipient = %recipient,
            course = %course,
            "badge minted"
        );
        Ok(token_id)
    }

    pub fn badge(&self, token_id: TokenId) -> Result<Badge, CredentialError> {
        Ok(self.store.get(token_id)?)
    }

    pub fn badge_metadata(&self, token_id: TokenId) -> Result<BadgeMetadata, CredentialError> {
        Ok(self.badge(token_id)?.metadata)
    }

    /// Tokens held by `owner`, oldest first.
    pub fn badges_of(&self, owner: &Address) -> Vec<TokenId> {
        self.owners.read().get(owner).cloned().unwrap_or_default()
    }

    /// Number of badges ever minted.
    pub fn total_supply(&self) -> u64 {
        self.store.len()
    }

    fn refuse_transfer(&self, caller: &Address, entry_point: &str) -> CredentialError {
        tracing::warn!(caller = %caller, entry_point, "badge ownership change refused");
        CredentialError::NonTransferable
    }
}

impl<S: RecordStore<Badge>> NonFungibleToken for CredentialRegistry<S> {
    fn balance_of(&self, owner: &Address) -> u64 {
        self.owners
            .read()
            .get(owner)
            .map_or(0, |tokens| tokens.len() as u64)
    }

    fn owner_of(&self, token_id: TokenId) -> Result<Address, CredentialError> {
        Ok(self.badge(token_id)?.owner)
    }

    fn transfer_from(
        &self,
        caller: &Address,
        _from: &Address,
        _to: &Address,
        _token_id: TokenId,
    ) -> Result<(), CredentialError> {
        Err(self.refuse_transfer(caller, "transfer_from"))
    }

    fn approve(
        &self,
        caller: &Address,
        _approved: &Address,
        _token_id: TokenId,
    ) -> Result<(), CredentialError> {
        Err(self.refuse_transfer(caller, "approve"))
    }

    fn set_approval_for_all(
        &self,
        caller: &Address,
        _operator: &Address,
        _approved: bool,
    ) -> Result<(), CredentialError> {
        Err(self.refuse_transfer(caller, "set_approval_for_all"))
    }
}
