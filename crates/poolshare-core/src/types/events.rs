//! # Registry Events
//!
//! Emitted once per committed state change for external indexers. A failed
//! operation emits nothing.

use serde::{Deserialize, Serialize};

use crate::errors::{CoreResult, PoolShareError};
use crate::types::{Address, Amount, PoolId, PositionId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum RegistryEvent {
    PositionMinted {
        id: PositionId,
        owner: Address,
        pool_id: PoolId,
        amount: Amount,
    },
    RewardsAdded {
        id: PositionId,
        amount: Amount,
    },
    RewardsClaimed {
        id: PositionId,
        owner: Address,
        amount: Amount,
    },
    PositionSplit {
        id: PositionId,
        new_ids: Vec<PositionId>,
    },
    PositionsMerged {
        ids: Vec<PositionId>,
        new_id: PositionId,
    },
    PositionBurned {
        id: PositionId,
        owner: Address,
    },
    PositionTransferred {
        id: PositionId,
        from: Address,
        to: Address,
    },
    MinterAuthorized {
        account: Address,
    },
    MinterRevoked {
        account: Address,
    },
}

impl RegistryEvent {
    /// Event name as seen by indexers
    pub fn name(&self) -> &'static str {
        match self {
            Self::PositionMinted { .. } => "PositionMinted",
            Self::RewardsAdded { .. } => "RewardsAdded",
            Self::RewardsClaimed { .. } => "RewardsClaimed",
            Self::PositionSplit { .. } => "PositionSplit",
            Self::PositionsMerged { .. } => "PositionsMerged",
            Self::PositionBurned { .. } => "PositionBurned",
            Self::PositionTransferred { .. } => "PositionTransferred",
            Self::MinterAuthorized { .. } => "MinterAuthorized",
            Self::MinterRevoked { .. } => "MinterRevoked",
        }
    }

    /// JSON encoding used when forwarding events to an indexer
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self)
            .map_err(|e| PoolShareError::invalid_parameter("event", &e.to_string()))
    }
}
