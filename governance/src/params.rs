//! Governance configuration.
//!
//! These are deployment-wide constants fixed at construction, never
//! per-proposal state.

use serde::{Deserialize, Serialize};
use yideng_types::TokenAmount;

/// Where an account's voting weight comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotingPowerPolicy {
    /// Balance frozen by an oracle snapshot taken when the proposal was created.
    #[default]
    Snapshot,
    /// Balance at the moment the vote is cast.
    Live,
}

/// Who may open a proposal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreationPolicy {
    /// Any account.
    #[default]
    Open,
    /// Only the administrator named by the authority gate.
    AdminOnly,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceParams {
    /// Minimum `votes_for + votes_against` for an outcome to count.
    pub quorum: TokenAmount,
    pub voting_power: VotingPowerPolicy,
    pub proposal_creation: CreationPolicy,
    /// Longest voting period a proposal may ask for (`None` = unbounded).
    pub max_voting_period_secs: Option<u64>,
}

impl GovernanceParams {
    /// Strict majority of the votes cast, with the quorum met.
    pub fn passes(&self, votes_for: TokenAmount, votes_against: TokenAmount) -> bool {
        let total = votes_for.saturating_add(votes_against);
        votes_for > votes_against && total >= self.quorum
    }
}
