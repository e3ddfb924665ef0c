//! Core governance engine. Creates proposals, accepts votes, tallies and
//! finalizes them.

use crate::error::GovernanceError;
use crate::params::{CreationPolicy, GovernanceParams, VotingPowerPolicy};
use crate::proposal::{Proposal, ProposalId, ProposalState, VoteStats};
use std::sync::Arc;
use yideng_store::{MemoryStore, RecordStore};
use yideng_types::{Address, AuthorityGate, BalanceOracle, Clock, TokenAmount};

/// Durable collection of proposals and their vote records.
pub trait ProposalStore: RecordStore<Proposal> {}

impl<S: RecordStore<Proposal>> ProposalStore for S {}

/// The governance engine.
///
/// Every method takes `&self`; share one engine behind an `Arc`. Votes on the
/// same proposal are serialized by the store's per-record lock, votes on
/// different proposals run in parallel.
pub struct GovernanceEngine<S = MemoryStore<Proposal>> {
    params: GovernanceParams,
    store: S,
    oracle: Arc<dyn BalanceOracle>,
    clock: Arc<dyn Clock>,
    authority: AuthorityGate,
}

impl GovernanceEngine {
    /// Engine backed by an in-memory proposal store.
    pub fn new(
        params: GovernanceParams,
        oracle: Arc<dyn BalanceOracle>,
        clock: Arc<dyn Clock>,
        authority: AuthorityGate,
    ) -> Self {
        Self::with_store(MemoryStore::new(), params, oracle, clock, authority)
    }
}

impl<S: ProposalStore> GovernanceEngine<S> {
    pub fn with_store(
        store: S,
        params: GovernanceParams,
        oracle: Arc<dyn BalanceOracle>,
        clock: Arc<dyn Clock>,
        authority: AuthorityGate,
    ) -> Self {
        Self {
            params,
            store,
            oracle,
            clock,
            authority,
        }
    }

    pub fn params(&self) -> &GovernanceParams {
        &self.params
    }

    /// Open a proposal for `voting_period_secs` seconds starting now.
    pub fn create_proposal(
        &self,
        creator: &Address,
        description: &str,
        voting_period_secs: u64,
    ) -> Result<ProposalId, GovernanceError> {
        let now = self.clock.now();

        if self.params.proposal_creation == CreationPolicy::AdminOnly {
            if let Err(e) = self.authority.require_authorized(creator) {
                tracing::warn!(creator = %creator, "proposal creation refused: not the administrator");
                return Err(e.into());
            }
        }
        if description.trim().is_empty() {
            return Err(GovernanceError::InvalidInput(
                "proposal description must not be empty".into(),
            ));
        }
        if voting_period_secs == 0 {
            return Err(GovernanceError::InvalidInput(
                "voting period must be at least one second".into(),
            ));
        }
        if let Some(max) = self.params.max_voting_period_secs {
            if voting_period_secs > max {
                return Err(GovernanceError::InvalidInput(format!(
                    "voting period {voting_period_secs}s exceeds the maximum of {max}s"
                )));
            }
        }
        let deadline = now.checked_add_secs(voting_period_secs).ok_or_else(|| {
            GovernanceError::InvalidInput(format!(
                "voting period {voting_period_secs}s overflows the clock"
            ))
        })?;

        let snapshot = match self.params.voting_power {
            VotingPowerPolicy::Snapshot => Some(self.oracle.snapshot()?),
            VotingPowerPolicy::Live => None,
        };

        let id = self.store.insert(|id| {
            Proposal::new(
                id,
                creator.clone(),
                description.to_string(),
                now,
                deadline,
                snapshot,
            )
        })?;

        tracing::info!(
            proposal = id,
            creator = %creator,
            deadline = %deadline,
            snapshot = ?snapshot,
            "proposal created"
        );
        Ok(id)
    }

    /// Weight `account` would vote with on this proposal.
    pub fn calculate_voting_power(
        &self,
        account: &Address,
        proposal_id: ProposalId,
    ) -> Result<TokenAmount, GovernanceError> {
        let proposal = self.store.get(proposal_id)?;
        self.voting_power_for(&proposal, account)
    }

    fn voting_power_for(
        &self,
        proposal: &Proposal,
        account: &Address,
    ) -> Result<TokenAmount, GovernanceError> {
        let snapshot = match self.params.voting_power {
            VotingPowerPolicy::Snapshot => proposal.snapshot,
            VotingPowerPolicy::Live => None,
        };
        Ok(self.oracle.balance_of(account, snapshot)?)
    }

    /// Cast `voter`'s single vote on a proposal.
    pub fn vote(
        &self,
        voter: &Address,
        proposal_id: ProposalId,
        support: bool,
    ) -> Result<(), GovernanceError> {
        let now = self.clock.now();
        let proposal = self.store.get(proposal_id)?;

        // Cheap rejections before consulting the oracle. They are repeated
        // under the record lock, which is what makes them binding.
        if !proposal.is_accepting_votes(now) {
            return Err(GovernanceError::VotingClosed(proposal_id));
        }
        if proposal.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted {
                proposal: proposal_id,
                voter: voter.clone(),
            });
        }

        let weight = self.voting_power_for(&proposal, voter)?;
        self.store
            .update(proposal_id, |p| p.record_vote(voter, support, weight, now))?;

        tracing::info!(
            proposal = proposal_id,
            voter = %voter,
            support,
            weight = %weight,
            "vote recorded"
        );
        Ok(())
    }

    /// Current tally. Provisional while the proposal is still open.
    pub fn vote_stats(&self, proposal_id: ProposalId) -> Result<VoteStats, GovernanceError> {
        let now = self.clock.now();
        let proposal = self.store.get(proposal_id)?;
        Ok(VoteStats::tally(&proposal, &self.params, now))
    }

    /// Close a proposal's lifecycle once its deadline has passed.
    ///
    /// A second call is an error, not a no-op. Returns the final tally.
    pub fn finalize(&self, proposal_id: ProposalId) -> Result<VoteStats, GovernanceError> {
        let now = self.clock.now();
        let proposal = self.store.update(proposal_id, |p| {
            p.mark_executed(now)?;
            Ok::<_, GovernanceError>(p.clone())
        })?;

        let stats = VoteStats::tally(&proposal, &self.params, now);
        tracing::info!(
            proposal = proposal_id,
            passed = stats.passed,
            votes_for = %stats.votes_for,
            votes_against = %stats.votes_against,
            "proposal finalized"
        );
        Ok(stats)
    }

    /// A copy of the proposal as currently stored.
    pub fn proposal(&self, proposal_id: ProposalId) -> Result<Proposal, GovernanceError> {
        Ok(self.store.get(proposal_id)?)
    }

    pub fn proposal_state(&self, proposal_id: ProposalId) -> Result<ProposalState, GovernanceError> {
        let now = self.clock.now();
        Ok(self.store.get(proposal_id)?.state(now))
    }

    pub fn has_voted(
        &self,
        proposal_id: ProposalId,
        account: &Address,
    ) -> Result<bool, GovernanceError> {
        Ok(self.store.get(proposal_id)?.has_voted(account))
    }

    /// Number of proposals ever created.
    pub fn proposal_count(&self) -> u64 {
        self.store.len()
    }

    /// Ids of all proposals, oldest first.
    pub fn proposal_ids(&self) -> Vec<ProposalId> {
        self.store.ids()
    }
}
