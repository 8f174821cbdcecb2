//! # Position Types
//!
//! A position is a fractional stake in one pool. It carries its principal,
//! its basis-point share of the pool's rewards and the rewards accrued but not
//! yet paid out.

use serde::{Deserialize, Serialize};

use crate::constants::NO_PARENT;
use crate::types::Address;

/// Unique, never reused position identifier
pub type PositionId = u64;

/// Pool identifier
pub type PoolId = u64;

/// Unsigned token amount
pub type Amount = u128;

/// A stake in a revenue pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Identifier, monotonically increasing across the registry
    pub id: PositionId,
    /// Current owner
    pub owner: Address,
    /// Pool the stake belongs to
    pub pool_id: PoolId,
    /// Amount staked; never zero for a live position
    pub principal: Amount,
    /// Share of pool rewards in basis points
    pub share_bps: u128,
    /// Unix timestamp (seconds) when the stake started
    pub created_at: i64,
    /// Rewards accrued and not yet claimed
    pub accumulated_rewards: Amount,
    /// Position this one was split from, or `NO_PARENT`
    pub parent_id: PositionId,
    /// True for outputs of a split or merge
    pub is_derived: bool,
}

impl Position {
    /// Whether this position was split off another one
    pub fn has_parent(&self) -> bool {
        self.parent_id != NO_PARENT
    }

    /// Whether the position has anything to claim
    pub fn has_rewards(&self) -> bool {
        self.accumulated_rewards > 0
    }

    /// Seconds the position has been open at `now`, never negative
    pub fn age_seconds(&self, now: i64) -> u64 {
        now.saturating_sub(self.created_at).max(0) as u64
    }
}

/// Parameters for a new position, validated by the registry before any
/// state is touched
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PositionDraft {
    pub owner: Address,
    pub pool_id: PoolId,
    pub principal: Amount,
    pub share_bps: u128,
    pub created_at: i64,
    pub accumulated_rewards: Amount,
    pub parent_id: PositionId,
    pub is_derived: bool,
}

impl PositionDraft {
    pub fn into_position(self, id: PositionId) -> Position {
        Position {
            id,
            owner: self.owner,
            pool_id: self.pool_id,
            principal: self.principal,
            share_bps: self.share_bps,
            created_at: self.created_at,
            accumulated_rewards: self.accumulated_rewards,
            parent_id: self.parent_id,
            is_derived: self.is_derived,
        }
    }
}
