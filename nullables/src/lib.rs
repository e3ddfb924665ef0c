//! Nullable infrastructure for deterministic testing.
//!
//! The engines reach the outside world only through the `Clock` and
//! `BalanceOracle` traits. This crate provides implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem, the network or the wall clock
//!
//! Usage: swap real implementations for nullables in tests and local demos.

pub mod clock;
pub mod oracle;

pub use clock::NullClock;
pub use oracle::NullBalanceOracle;
