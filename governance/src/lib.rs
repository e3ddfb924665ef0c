//! Token-weighted governance for Yideng.
//!
//! Lifecycle: Open → Closed → Finalized.
//! Votes are accepted only while a proposal is Open (before its deadline),
//! finalization only once it is Closed. Nothing ever moves backwards.
//!
//! Key principle: one account = one vote per proposal, weighted by the
//! account's governance-token balance. By default that balance is read from
//! a snapshot frozen when the proposal was created, so tokens acquired
//! mid-vote add no weight.

pub mod engine;
pub mod error;
pub mod params;
pub mod proposal;

pub use engine::{GovernanceEngine, ProposalStore};
pub use error::GovernanceError;
pub use params::{CreationPolicy, GovernanceParams, VotingPowerPolicy};
pub use proposal::{Proposal, ProposalId, ProposalState, VoteRecord, VoteStats};
