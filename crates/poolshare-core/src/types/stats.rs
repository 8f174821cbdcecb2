//! Aggregates computed by full scans over the owner and pool indices.

use serde::{Deserialize, Serialize};

use crate::types::Amount;

/// Totals over every position held by one owner
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerStats {
    pub position_count: usize,
    pub total_principal: Amount,
    pub total_rewards: Amount,
}

/// Totals over every position in one pool
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    pub position_count: usize,
    pub total_principal: Amount,
    pub total_rewards: Amount,
    pub unique_owners: usize,
}
