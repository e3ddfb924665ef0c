use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("governance error: {0}")]
    Governance(#[from] yideng_governance::GovernanceError),

    #[error("credential error: {0}")]
    Credentials(#[from] yideng_credentials::CredentialError),

    #[error("config error: {0}")]
    Config(String),

    #[error("logging error: {0}")]
    Logging(String),
}
