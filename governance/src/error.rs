use crate::proposal::ProposalId;
use thiserror::Error;
use yideng_store::StoreError;
use yideng_types::{Address, OracleError, Unauthorized};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GovernanceError {
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("account {voter} has already voted on proposal {proposal}")]
    AlreadyVoted { proposal: ProposalId, voter: Address },

    #[error("voting on proposal {0} is closed")]
    VotingClosed(ProposalId),

    #[error("voting on proposal {0} is still open")]
    VotingStillOpen(ProposalId),

    #[error("proposal {0} has already been finalized")]
    AlreadyExecuted(ProposalId),

    #[error("account {0} has no voting power")]
    ZeroVotingPower(Address),

    #[error("{0}")]
    Unauthorized(#[from] Unauthorized),

    #[error("balance oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("vote tally overflow on proposal {0}")]
    TallyOverflow(ProposalId),

    #[error("proposal id space exhausted")]
    Capacity,
}

impl From<StoreError> for GovernanceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => GovernanceError::ProposalNotFound(id),
            StoreError::CapacityExhausted => GovernanceError::Capacity,
        }
    }
}
