//! Learning badges: non-transferable achievement credentials.
//!
//! A badge records that a recipient completed a course: course, instructor,
//! recipient name and hours. Only the administrator may mint. Once minted a
//! badge belongs to its recipient forever; every ownership-changing entry
//! point of the token interface fails with `NonTransferable`.

pub mod badge;
pub mod error;
pub mod registry;
pub mod token;

pub use badge::{Badge, BadgeMetadata, TokenId};
pub use error::CredentialError;
pub use registry::CredentialRegistry;
pub use token::NonFungibleToken;
