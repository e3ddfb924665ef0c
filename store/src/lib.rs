//! Record storage for the Yideng engines.
//!
//! Proposals and badges are append-only records keyed by a sequential id.
//! The engines depend only on the [`RecordStore`] trait; [`MemoryStore`] is
//! the in-process implementation.

pub mod error;
pub mod memory;
pub mod record;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use record::{RecordId, RecordStore};
