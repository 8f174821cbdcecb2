//! Registry of accounts allowed to mint positions and add rewards.
//!
//! Constructed explicitly and handed to the position registry, so the set of
//! minters is never ambient global state. Only the owner may change it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::{CoreResult, PoolShareError};
use crate::types::Address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityRegistry {
    /// Account that can add/remove minters
    owner: Address,
    /// Accounts allowed to mint positions and add rewards
    minters: HashSet<Address>,
}

impl AuthorityRegistry {
    /// Create a registry with no minters
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            minters: HashSet::new(),
        }
    }

    /// Create a registry with an initial set of minters
    pub fn with_minters<I>(owner: Address, minters: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        Self {
            owner,
            minters: minters.into_iter().collect(),
        }
    }

    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Check if an account may mint positions / add rewards
    pub fn is_authorized(&self, account: &Address) -> bool {
        self.minters.contains(account)
    }

    /// Fails with `Unauthorized` unless `caller` is a minter
    pub fn require_authorized(&self, caller: &Address) -> CoreResult<()> {
        if !self.is_authorized(caller) {
            return Err(PoolShareError::Unauthorized);
        }
        Ok(())
    }

    /// Fails with `Unauthorized` unless `caller` is the owner
    pub fn require_owner(&self, caller: &Address) -> CoreResult<()> {
        if *caller != self.owner {
            return Err(PoolShareError::Unauthorized);
        }
        Ok(())
    }

    /// Add a minter. Returns false if it was already present.
    pub fn authorize(&mut self, caller: &Address, account: Address) -> CoreResult<bool> {
        self.require_owner(caller)?;
        Ok(self.minters.insert(account))
    }

    /// Remove a minter. Returns false if it was not present.
    pub fn revoke(&mut self, caller: &Address, account: &Address) -> CoreResult<bool> {
        self.require_owner(caller)?;
        Ok(self.minters.remove(account))
    }

    pub fn minter_count(&self) -> usize {
        self.minters.len()
    }
}
