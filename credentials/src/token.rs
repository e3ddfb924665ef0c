//! Uniform non-fungible token interface.
//!
//! Hosts that expect every token contract to look alike get the usual entry
//! points. Implementations decide which of them are meaningful; the badge
//! registry refuses every ownership change.

use crate::badge::TokenId;
use crate::error::CredentialError;
use yideng_types::Address;

pub trait NonFungibleToken {
    /// Number of tokens held by `owner`. Zero for unknown accounts.
    fn balance_of(&self, owner: &Address) -> u64;

    fn owner_of(&self, token_id: TokenId) -> Result<Address, CredentialError>;

    /// Move `token_id` from `from` to `to` on behalf of `caller`.
    fn transfer_from(
        &self,
        caller: &Address,
        from: &Address,
        to: &Address,
        token_id: TokenId,
    ) -> Result<(), CredentialError>;

    /// Let `approved` transfer `token_id` on the owner's behalf.
    fn approve(
        &self,
        caller: &Address,
        approved: &Address,
        token_id: TokenId,
    ) -> Result<(), CredentialError>;

    /// Let `operator` transfer every token `caller` owns.
    fn set_approval_for_all(
        &self,
        caller: &Address,
        operator: &Address,
        approved: bool,
    ) -> Result<(), CredentialError>;
}
