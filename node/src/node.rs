//! The Yideng node struct: wires the engines together from configuration.

use std::sync::Arc;

use yideng_credentials::CredentialRegistry;
use yideng_governance::{GovernanceEngine, ProposalId};
use yideng_types::{Address, AuthorityGate, BalanceOracle, Clock};

use crate::config::NodeConfig;
use crate::error::NodeError;

/// One deployment: a governance engine and a credential registry sharing a
/// single administrator.
///
/// Both engines are built once and handed out as `Arc`s, so callers on many
/// threads share the same state.
pub struct Node {
    config: NodeConfig,
    authority: AuthorityGate,
    governance: Arc<GovernanceEngine>,
    credentials: Arc<CredentialRegistry>,
}

impl Node {
    /// Validate `config` and build both engines around the injected
    /// balance oracle and clock.
    pub fn new(
        config: NodeConfig,
        oracle: Arc<dyn BalanceOracle>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, NodeError> {
        config.validate()?;

        let authority = config.authority();
        let params = config.governance_params();

        tracing::info!(
            admin = %authority.admin(),
            quorum = %params.quorum,
            voting_power = ?params.voting_power,
            proposal_creation = ?params.proposal_creation,
            "starting yideng node"
        );

        let governance = Arc::new(GovernanceEngine::new(
            params,
            oracle,
            Arc::clone(&clock),
            authority.clone(),
        ));
        let credentials = Arc::new(CredentialRegistry::new(clock, authority.clone()));

        Ok(Self {
            config,
            authority,
            governance,
            credentials,
        })
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    pub fn authority(&self) -> &AuthorityGate {
        &self.authority
    }

    pub fn governance(&self) -> Arc<GovernanceEngine> {
        Arc::clone(&self.governance)
    }

    pub fn credentials(&self) -> Arc<CredentialRegistry> {
        Arc::clone(&self.credentials)
    }

    /// Open a proposal with the configured `default_voting_period_secs`.
    pub fn create_proposal_with_default_period(
        &self,
        creator: &Address,
        description: &str,
    ) -> Result<ProposalId, NodeError> {
        Ok(self.governance.create_proposal(
            creator,
            description,
            self.config.default_voting_period_secs,
        )?)
    }
}
