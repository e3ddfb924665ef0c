//! Node configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use yideng_governance::{CreationPolicy, GovernanceParams, VotingPowerPolicy};
use yideng_types::{Address, AuthorityGate, TokenAmount};

use crate::logging::{try_init_logging, LogFormat};
use crate::NodeError;

/// Configuration for a Yideng node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Administrator address: the only account allowed to mint badges (and,
    /// under `admin_only`, to open proposals). Required.
    #[serde(default)]
    pub admin: String,

    /// Minimum total voting power (`for + against`) for a proposal to pass.
    #[serde(default)]
    pub quorum: u64,

    /// Where voting power is read from: "snapshot" or "live".
    #[serde(default)]
    pub voting_power: VotingPowerPolicy,

    /// Who may open proposals: "open" or "admin_only".
    #[serde(default)]
    pub proposal_creation: CreationPolicy,

    /// Upper bound on a proposal's voting period, in seconds.
    #[serde(default)]
    pub max_voting_period_secs: Option<u64>,

    /// Voting period used when a caller does not choose one.
    #[serde(default = "default_voting_period_secs")]
    pub default_voting_period_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_voting_period_secs() -> u64 {
    7 * 24 * 3600
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, NodeError> {
        toml::to_string_pretty(self).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Check the values that have no sensible default.
    pub fn validate(&self) -> Result<(), NodeError> {
        if self.admin.trim().is_empty() {
            return Err(NodeError::Config("admin address must be set".into()));
        }
        if self.default_voting_period_secs == 0 {
            return Err(NodeError::Config(
                "default_voting_period_secs must be positive".into(),
            ));
        }
        if let Some(max) = self.max_voting_period_secs {
            if self.default_voting_period_secs > max {
                return Err(NodeError::Config(format!(
                    "default_voting_period_secs ({}) exceeds max_voting_period_secs ({max})",
                    self.default_voting_period_secs
                )));
            }
        }
        self.log_format()?;
        Ok(())
    }

    pub fn authority(&self) -> AuthorityGate {
        AuthorityGate::new(Address::new(self.admin.trim()))
    }

    pub fn governance_params(&self) -> GovernanceParams {
        GovernanceParams {
            quorum: TokenAmount::new(u128::from(self.quorum)),
            voting_power: self.voting_power,
            proposal_creation: self.proposal_creation,
            max_voting_period_secs: self.max_voting_period_secs,
        }
    }

    pub fn log_format(&self) -> Result<LogFormat, NodeError> {
        LogFormat::from_str(&self.log_format)
    }

    /// Install the global tracing subscriber with this config's format and level.
    pub fn init_logging(&self) -> Result<(), NodeError> {
        try_init_logging(self.log_format()?, &self.log_level)
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            admin: String::new(),
            quorum: 0,
            voting_power: VotingPowerPolicy::default(),
            proposal_creation: CreationPolicy::default(),
            max_voting_period_secs: None,
            default_voting_period_secs: default_voting_period_secs(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
