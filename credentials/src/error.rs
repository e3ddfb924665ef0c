use crate::badge::TokenId;
use thiserror::Error;
use yideng_store::StoreError;
use yideng_types::Unauthorized;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("badge {0} not found")]
    BadgeNotFound(TokenId),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Unauthorized(#[from] Unauthorized),

    #[error("learning badges are non-transferable")]
    NonTransferable,

    #[error("badge id space exhausted")]
    Capacity,
}

impl From<StoreError> for CredentialError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(id) => CredentialError::BadgeNotFound(id),
            StoreError::CapacityExhausted => CredentialError::Capacity,
        }
    }
}
