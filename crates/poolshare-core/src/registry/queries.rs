//! Read-only views over the registry: lookups, index enumeration, bounded
//! pages and aggregate statistics.
//!
//! Enumeration order follows the swap-remove index and changes whenever a
//! position is removed. Only membership and counts are meaningful.

use std::collections::HashSet;

use crate::errors::CoreResult;
use crate::math::safe_math::saturating_sum;
use crate::registry::PositionRegistry;
use crate::types::{
    Address, OwnerStats, PoolId, PoolStats, Position, PositionId, RegistryEvent,
};

impl PositionRegistry {
    /// Look up a position by id
    pub fn get_position(&self, id: PositionId) -> CoreResult<&Position> {
        self.position(id)
    }

    /// Current owner of a position
    pub fn owner_of(&self, id: PositionId) -> CoreResult<Address> {
        self.position(id).map(|position| position.owner)
    }

    pub fn get_positions_by_owner(&self, owner: &Address) -> &[PositionId] {
        self.by_owner.ids(owner)
    }

    pub fn get_positions_by_pool(&self, pool_id: PoolId) -> &[PositionId] {
        self.by_pool.ids(&pool_id)
    }

    /// At most `limit` ids of `owner` starting at `offset`; empty past the end
    pub fn get_positions_by_owner_paged(
        &self,
        owner: &Address,
        offset: usize,
        limit: usize,
    ) -> &[PositionId] {
        self.by_owner.page(owner, offset, limit)
    }

    /// At most `limit` ids of `pool_id` starting at `offset`; empty past the end
    pub fn get_positions_by_pool_paged(
        &self,
        pool_id: PoolId,
        offset: usize,
        limit: usize,
    ) -> &[PositionId] {
        self.by_pool.page(&pool_id, offset, limit)
    }

    /// Number of live positions
    pub fn get_total_positions(&self) -> usize {
        self.positions.len()
    }

    /// Id the next created position will receive
    pub fn next_position_id(&self) -> PositionId {
        self.next_id
    }

    pub fn get_owner_stats(&self, owner: &Address) -> OwnerStats {
        let positions: Vec<&Position> = self.resolve(self.by_owner.ids(owner));
        OwnerStats {
            position_count: positions.len(),
            total_principal: saturating_sum(positions.iter().map(|p| p.principal)),
            total_rewards: saturating_sum(positions.iter().map(|p| p.accumulated_rewards)),
        }
    }

    pub fn get_pool_stats(&self, pool_id: PoolId) -> PoolStats {
        let positions: Vec<&Position> = self.resolve(self.by_pool.ids(&pool_id));
        let owners: HashSet<&Address> = positions.iter().map(|p| &p.owner).collect();
        PoolStats {
            position_count: positions.len(),
            total_principal: saturating_sum(positions.iter().map(|p| p.principal)),
            total_rewards: saturating_sum(positions.iter().map(|p| p.accumulated_rewards)),
            unique_owners: owners.len(),
        }
    }

    /// Events committed since the last drain, oldest first
    pub fn pending_events(&self) -> &[RegistryEvent] {
        &self.events
    }

    /// Take every pending event, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        std::mem::take(&mut self.events)
    }

    fn resolve(&self, ids: &[PositionId]) -> Vec<&Position> {
        ids.iter().filter_map(|id| self.positions.get(id)).collect()
    }
}
