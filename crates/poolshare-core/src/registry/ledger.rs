//! # Value Ledger Interface
//!
//! The registry never holds funds. Payouts go through a `ValueLedger`, which
//! moves the reward-bearing balance. A ledger may call back into the registry
//! while a transfer is in progress; the registry finalizes its own state
//! before every transfer so such a call only ever sees settled values.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::LedgerError;
use crate::registry::PositionRegistry;
use crate::types::{Address, Amount};

/// External balance system that pays out claimed rewards
pub trait ValueLedger {
    /// Move `amount` to `to`. The registry passes itself back so callback
    /// style ledgers can re-enter it during the transfer.
    fn transfer(
        &mut self,
        registry: &mut PositionRegistry,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Ledger that pays from a single reserve into per-account balances
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryLedger {
    reserve: Amount,
    balances: HashMap<Address, Amount>,
}

impl InMemoryLedger {
    pub fn with_reserve(reserve: Amount) -> Self {
        Self {
            reserve,
            balances: HashMap::new(),
        }
    }

    pub fn reserve(&self) -> Amount {
        self.reserve
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }
}

impl ValueLedger for InMemoryLedger {
    fn transfer(
        &mut self,
        _registry: &mut PositionRegistry,
        to: &Address,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        if amount > self.reserve {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available: self.reserve,
            });
        }

        let balance = self.balances.entry(*to).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or_else(|| LedgerError::Rejected("balance overflow".to_string()))?;
        self.reserve -= amount;

        debug!(to = %to, amount, reserve = self.reserve, "ledger transfer");
        Ok(())
    }
}
