//! Yideng node: the composition root.
//!
//! The node is the one place where collaborators are wired together:
//! - Reads configuration (quorum, voting-power policy, administrator)
//! - Builds a single authority gate shared by both engines
//! - Constructs the governance engine and the credential registry once
//! - Hands out stable `Arc` handles to them
//! - Initialises structured logging

pub mod config;
pub mod error;
pub mod logging;
pub mod node;

pub use config::NodeConfig;
pub use error::NodeError;
pub use logging::{init_logging, try_init_logging, LogFormat};
pub use node::Node;
