//! Governance proposals and their lifecycle.

use crate::error::GovernanceError;
use crate::params::GovernanceParams;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use yideng_store::RecordId;
use yideng_types::{Address, SnapshotId, Timestamp, TokenAmount};

pub type ProposalId = RecordId;

/// Where a proposal is in its lifecycle at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalState {
    /// Before the deadline: votes accepted, tallies provisional.
    Open,
    /// Deadline passed, not yet finalized.
    Closed,
    /// Finalized. Terminal.
    Finalized,
}

/// How one account voted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub support: bool,
    pub weight: TokenAmount,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub description: String,
    pub creator: Address,
    pub created_at: Timestamp,
    /// First instant at which voting is closed.
    pub deadline: Timestamp,
    /// Balance snapshot voting power is read from, under the snapshot policy.
    pub snapshot: Option<SnapshotId>,
    pub votes_for: TokenAmount,
    pub votes_against: TokenAmount,
    /// Everyone who has voted. Only ever grows.
    pub voters: BTreeMap<Address, VoteRecord>,
    pub executed: bool,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        creator: Address,
        description: String,
        created_at: Timestamp,
        deadline: Timestamp,
        snapshot: Option<SnapshotId>,
    ) -> Self {
        Self {
            id,
            description,
            creator,
            created_at,
            deadline,
            snapshot,
            votes_for: TokenAmount::ZERO,
            votes_against: TokenAmount::ZERO,
            voters: BTreeMap::new(),
            executed: false,
        }
    }

    pub fn state(&self, now: Timestamp) -> ProposalState {
        if self.executed {
            ProposalState::Finalized
        } else if now < self.deadline {
            ProposalState::Open
        } else {
            ProposalState::Closed
        }
    }

    /// Voting window is `[created_at, deadline)` and the proposal is not finalized.
    pub fn is_accepting_votes(&self, now: Timestamp) -> bool {
        !self.executed && now >= self.created_at && now < self.deadline
    }

    pub fn has_voted(&self, account: &Address) -> bool {
        self.voters.contains_key(account)
    }

    pub fn total_votes(&self) -> TokenAmount {
        self.votes_for.saturating_add(self.votes_against)
    }

    /// Record `voter`'s ballot. All checks and the insertion happen on the
    /// same `&mut self`, so under the store's record lock they are one step.
    pub(crate) fn record_vote(
        &mut self,
        voter: &Address,
        support: bool,
        weight: TokenAmount,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        if !self.is_accepting_votes(now) {
            return Err(GovernanceError::VotingClosed(self.id));
        }
        if self.has_voted(voter) {
            return Err(GovernanceError::AlreadyVoted {
                proposal: self.id,
                voter: voter.clone(),
            });
        }
        if weight.is_zero() {
            return Err(GovernanceError::ZeroVotingPower(voter.clone()));
        }
        // Keep `total_votes` representable.
        self.total_votes()
            .checked_add(weight)
            .ok_or(GovernanceError::TallyOverflow(self.id))?;

        let side = if support {
            &mut self.votes_for
        } else {
            &mut self.votes_against
        };
        *side = side
            .checked_add(weight)
            .ok_or(GovernanceError::TallyOverflow(self.id))?;
        self.voters
            .insert(voter.clone(), VoteRecord { support, weight });
        Ok(())
    }

    /// Close the lifecycle. Only legal once the deadline has passed, and only once.
    pub(crate) fn mark_executed(&mut self, now: Timestamp) -> Result<(), GovernanceError> {
        if now < self.deadline {
            return Err(GovernanceError::VotingStillOpen(self.id));
        }
        if self.executed {
            return Err(GovernanceError::AlreadyExecuted(self.id));
        }
        self.executed = true;
        Ok(())
    }
}

/// Tally of a proposal as seen at one instant.
///
/// While `state` is [`ProposalState::Open`] the numbers (and `passed`) are
/// provisional: later votes can still change them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStats {
    pub votes_for: TokenAmount,
    pub votes_against: TokenAmount,
    pub total_votes: TokenAmount,
    pub passed: bool,
    pub state: ProposalState,
}

impl VoteStats {
    pub fn tally(proposal: &Proposal, params: &GovernanceParams, now: Timestamp) -> Self {
        Self {
            votes_for: proposal.votes_for,
            votes_against: proposal.votes_against,
            total_votes: proposal.total_votes(),
            passed: params.passes(proposal.votes_for, proposal.votes_against),
            state: proposal.state(now),
        }
    }

    pub fn is_provisional(&self) -> bool {
        self.state == ProposalState::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter(name: &str) -> Address {
        Address::new(format!("0x{name}"))
    }

    fn ts(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    fn amount(raw: u128) -> TokenAmount {
        TokenAmount::new(raw)
    }

    fn open_proposal() -> Proposal {
        Proposal::new(1, voter("creator"), "raise the fee".into(), ts(100), ts(200), None)
    }

    #[test]
    fn new_proposal_is_open_and_empty() {
        let p = open_proposal();
        assert_eq!(p.state(ts(100)), ProposalState::Open);
        assert_eq!(p.total_votes(), TokenAmount::ZERO);
        assert!(p.voters.is_empty());
        assert!(!p.executed);
    }

    #[test]
    fn deadline_is_exclusive() {
        let p = open_proposal();
        assert!(p.is_accepting_votes(ts(199)));
        assert!(!p.is_accepting_votes(ts(200)));
        assert_eq!(p.state(ts(200)), ProposalState::Closed);
    }

    #[test]
    fn votes_accumulate_per_side() {
        let mut p = open_proposal();
        p.record_vote(&voter("a"), true, amount(60), ts(150)).unwrap();
        p.record_vote(&voter("b"), false, amount(50), ts(151)).unwrap();
        p.record_vote(&voter("c"), true, amount(5), ts(152)).unwrap();

        assert_eq!(p.votes_for, amount(65));
        assert_eq!(p.votes_against, amount(50));
        assert_eq!(p.total_votes(), amount(115));
        assert_eq!(
            p.voters.get(&voter("b")),
            Some(&VoteRecord {
                support: false,
                weight: amount(50)
            })
        );
    }

    #[test]
    fn second_vote_rejected_and_tally_unchanged() {
        let mut p = open_proposal();
        p.record_vote(&voter("a"), true, amount(60), ts(150)).unwrap();
        let err = p
            .record_vote(&voter("a"), false, amount(60), ts(151))
            .unwrap_err();
        assert_eq!(
            err,
            GovernanceError::AlreadyVoted {
                proposal: 1,
                voter: voter("a")
            }
        );
        assert_eq!(p.votes_for, amount(60));
        assert_eq!(p.votes_against, TokenAmount::ZERO);
    }

    #[test]
    fn zero_weight_is_rejected_without_recording_voter() {
        let mut p = open_proposal();
        let err = p
            .record_vote(&voter("a"), true, TokenAmount::ZERO, ts(150))
            .unwrap_err();
        assert_eq!(err, GovernanceError::ZeroVotingPower(voter("a")));
        assert!(!p.has_voted(&voter("a")));
    }

    #[test]
    fn vote_after_deadline_is_closed() {
        let mut p = open_proposal();
        let err = p
            .record_vote(&voter("a"), true, amount(1), ts(200))
            .unwrap_err();
        assert_eq!(err, GovernanceError::VotingClosed(1));
    }

    #[test]
    fn tally_overflow_is_refused() {
        let mut p = open_proposal();
        p.record_vote(&voter("a"), true, amount(u128::MAX), ts(150))
            .unwrap();
        let err = p
            .record_vote(&voter("b"), false, amount(1), ts(150))
            .unwrap_err();
        assert_eq!(err, GovernanceError::TallyOverflow(1));
        assert!(!p.has_voted(&voter("b")));
        assert_eq!(p.votes_against, TokenAmount::ZERO);
    }

    #[test]
    fn execute_only_after_deadline_and_only_once() {
        let mut p = open_proposal();
        assert_eq!(
            p.mark_executed(ts(199)),
            Err(GovernanceError::VotingStillOpen(1))
        );
        assert_eq!(p.mark_executed(ts(200)), Ok(()));
        assert_eq!(p.state(ts(500)), ProposalState::Finalized);
        assert_eq!(
            p.mark_executed(ts(201)),
            Err(GovernanceError::AlreadyExecuted(1))
        );
    }

    #[test]
    fn stats_are_provisional_while_open() {
        let params = GovernanceParams::default();
        let mut p = open_proposal();
        p.record_vote(&voter("a"), true, amount(10), ts(150)).unwrap();

        let open = VoteStats::tally(&p, &params, ts(150));
        assert!(open.is_provisional());
        assert!(open.passed);

        let closed = VoteStats::tally(&p, &params, ts(250));
        assert!(!closed.is_provisional());
        assert_eq!(closed.state, ProposalState::Closed);
    }
}
