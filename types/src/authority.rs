//! Authority gate: who administers a deployment.
//!
//! The administrator is a configuration value injected at construction,
//! decoupled from whoever happened to deploy the engines. Both the governance
//! engine and the credential registry consult the same gate.

use crate::address::Address;
use crate::error::Unauthorized;
use serde::{Deserialize, Serialize};

/// Single source of truth for "is this caller the administrator".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityGate {
    admin: Address,
}

impl AuthorityGate {
    pub fn new(admin: Address) -> Self {
        Self { admin }
    }

    /// The configured administrator.
    pub fn admin(&self) -> &Address {
        &self.admin
    }

    pub fn is_authorized(&self, caller: &Address) -> bool {
        *caller == self.admin
    }

    /// Fail with [`Unauthorized`] unless `caller` is the administrator.
    pub fn require_authorized(&self, caller: &Address) -> Result<(), Unauthorized> {
        if self.is_authorized(caller) {
            Ok(())
        } else {
            Err(Unauthorized(caller.clone()))
        }
    }
}
