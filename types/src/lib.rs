//! Fundamental types for the Yideng engines.
//!
//! This crate defines what every other crate in the workspace shares:
//! account addresses, token amounts, timestamps and the clock, the balance
//! oracle boundary, and the authority gate that decides who administers the
//! deployment.

pub mod address;
pub mod amount;
pub mod authority;
pub mod error;
pub mod oracle;
pub mod time;

pub use address::Address;
pub use amount::TokenAmount;
pub use authority::AuthorityGate;
pub use error::{OracleError, Unauthorized};
pub use oracle::{BalanceOracle, SnapshotId};
pub use time::{Clock, SystemClock, Timestamp};
