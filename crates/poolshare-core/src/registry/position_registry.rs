//! # Position Registry
//!
//! Owns every position plus the owner and pool indices. Each mutating entry
//! point first validates and builds a plan without touching state, then
//! applies the plan with infallible steps only. A rejected call therefore
//! leaves positions, indices, the id counter and the event log untouched.
//!
//! Ownership changes update both indices in the same step as the position
//! map, so nothing observable can see one without the other.
//!
//! While a claim is paying out through the ledger, the position being paid
//! cannot be split, merged, burned or transferred. A refused payout can then
//! always put the claimed amount back.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::constants::{FIRST_POSITION_ID, MIN_MERGE_INPUTS, NO_PARENT};
use crate::errors::{CoreResult, PoolShareError};
use crate::math::reward_math::allocate_proportionally;
use crate::math::safe_math::{checked_sum, safe_add_u128, safe_add_u64, saturating_sum};
use crate::registry::{AuthorityRegistry, Clock, PositionIndex, ValueLedger};
use crate::types::{Address, Amount, PoolId, Position, PositionDraft, PositionId, RegistryEvent};

/// Registry of revenue pool positions
#[derive(Debug)]
pub struct PositionRegistry {
    pub(crate) authority: AuthorityRegistry,
    pub(crate) clock: Box<dyn Clock>,
    pub(crate) positions: HashMap<PositionId, Position>,
    pub(crate) by_owner: PositionIndex<Address>,
    pub(crate) by_pool: PositionIndex<PoolId>,
    pub(crate) next_id: PositionId,
    pub(crate) events: Vec<RegistryEvent>,
    /// Positions whose claim is waiting on the ledger
    pub(crate) paying: HashSet<PositionId>,
}

/// Outputs of a validated split
struct SplitPlan {
    parent: Position,
    children: Vec<Position>,
}

/// Output of a validated merge
struct MergePlan {
    inputs: Vec<PositionId>,
    merged: Position,
}

fn rejected(operation: &'static str, caller: &Address, err: PoolShareError) -> PoolShareError {
    debug!(operation, caller = %caller, kind = ?err.kind(), error = %err, "operation rejected");
    err
}

impl PositionRegistry {
    /// Create an empty registry with an injected authority set and clock
    pub fn new(authority: AuthorityRegistry, clock: Box<dyn Clock>) -> Self {
        Self {
            authority,
            clock,
            positions: HashMap::new(),
            by_owner: PositionIndex::new(),
            by_pool: PositionIndex::new(),
            next_id: FIRST_POSITION_ID,
            events: Vec::new(),
            paying: HashSet::new(),
        }
    }

    pub fn authority(&self) -> &AuthorityRegistry {
        &self.authority
    }

    // ========================================================================
    // Authorization management
    // ========================================================================

    /// Allow `account` to mint positions and add rewards (owner only)
    pub fn authorize_minter(&mut self, caller: &Address, account: Address) -> CoreResult<()> {
        let added = self
            .authority
            .authorize(caller, account)
            .map_err(|e| rejected("authorize_minter", caller, e))?;
        if added {
            info!(account = %account, "minter authorized");
            self.events.push(RegistryEvent::MinterAuthorized { account });
        }
        Ok(())
    }

    /// Withdraw minting rights from `account` (owner only)
    pub fn revoke_minter(&mut self, caller: &Address, account: &Address) -> CoreResult<()> {
        let removed = self
            .authority
            .revoke(caller, account)
            .map_err(|e| rejected("revoke_minter", caller, e))?;
        if removed {
            info!(account = %account, "minter revoked");
            self.events.push(RegistryEvent::MinterRevoked { account: *account });
        }
        Ok(())
    }

    pub fn is_authorized(&self, account: &Address) -> bool {
        self.authority.is_authorized(account)
    }

    // ========================================================================
    // Mint / burn / transfer
    // ========================================================================

    /// Create a position for `to`. Caller must be an authorized minter.
    pub fn mint(
        &mut self,
        caller: &Address,
        to: Address,
        pool_id: PoolId,
        principal: Amount,
        share_bps: u128,
    ) -> CoreResult<PositionId> {
        let (id, draft) = self
            .plan_mint(caller, to, pool_id, principal, share_bps)
            .map_err(|e| rejected("mint", caller, e))?;

        self.store(draft.into_position(id));
        info!(position_id = id, owner = %to, pool_id, principal, share_bps, "position minted");
        self.events.push(RegistryEvent::PositionMinted {
            id,
            owner: to,
            pool_id,
            amount: principal,
        });
        Ok(id)
    }

    fn plan_mint(
        &self,
        caller: &Address,
        to: Address,
        pool_id: PoolId,
        principal: Amount,
        share_bps: u128,
    ) -> CoreResult<(PositionId, PositionDraft)> {
        self.authority.require_authorized(caller)?;
        if principal == 0 {
            return Err(PoolShareError::InvalidAmount);
        }
        let id = self.reserve_ids(1)?[0];

        let draft = PositionDraft {
            owner: to,
            pool_id,
            principal,
            share_bps,
            created_at: self.clock.unix_timestamp(),
            accumulated_rewards: 0,
            parent_id: NO_PARENT,
            is_derived: false,
        };
        Ok((id, draft))
    }

    /// Destroy a position. Only the owner may burn, and only once its rewards
    /// have been claimed.
    pub fn burn(&mut self, caller: &Address, id: PositionId) -> CoreResult<()> {
        let position = self
            .settled_position(caller, id)
            .map_err(|e| rejected("burn", caller, e))?;
        if position.has_rewards() {
            return Err(rejected("burn", caller, PoolShareError::UnclaimedRewards(id)));
        }

        let owner = position.owner;
        self.unstore(id);
        info!(position_id = id, owner = %owner, "position burned");
        self.events.push(RegistryEvent::PositionBurned { id, owner });
        Ok(())
    }

    /// Hand a position to another owner. The pool index is unaffected.
    pub fn transfer_position(
        &mut self,
        caller: &Address,
        id: PositionId,
        to: Address,
    ) -> CoreResult<()> {
        let from = self
            .settled_position(caller, id)
            .map_err(|e| rejected("transfer_position", caller, e))?
            .owner;
        if from == to {
            return Ok(());
        }

        if let Some(position) = self.positions.get_mut(&id) {
            position.owner = to;
            self.by_owner.remove(from, id);
            self.by_owner.insert(to, id);
        }
        info!(position_id = id, from = %from, to = %to, "position transferred");
        self.events.push(RegistryEvent::PositionTransferred { id, from, to });
        Ok(())
    }

    // ========================================================================
    // Rewards
    // ========================================================================

    /// Accrue `amount` on a position. Caller must be an authorized minter.
    pub fn add_rewards(&mut self, caller: &Address, id: PositionId, amount: Amount) -> CoreResult<()> {
        self.add_rewards_batch(caller, &[id], &[amount])
    }

    /// Accrue rewards on several positions at once; either every entry is
    /// applied or none is. An id may appear more than once.
    pub fn add_rewards_batch(
        &mut self,
        caller: &Address,
        ids: &[PositionId],
        amounts: &[Amount],
    ) -> CoreResult<()> {
        let totals = self
            .plan_add_rewards(caller, ids, amounts)
            .map_err(|e| rejected("add_rewards", caller, e))?;

        for (id, total) in totals {
            if let Some(position) = self.positions.get_mut(&id) {
                position.accumulated_rewards = total;
            }
        }
        for (&id, &amount) in ids.iter().zip(amounts) {
            info!(position_id = id, amount, "rewards added");
            self.events.push(RegistryEvent::RewardsAdded { id, amount });
        }
        Ok(())
    }

    fn plan_add_rewards(
        &self,
        caller: &Address,
        ids: &[PositionId],
        amounts: &[Amount],
    ) -> CoreResult<HashMap<PositionId, Amount>> {
        self.authority.require_authorized(caller)?;
        if ids.len() != amounts.len() {
            return Err(PoolShareError::LengthMismatch(ids.len(), amounts.len()));
        }
        if ids.is_empty() {
            return Err(PoolShareError::InvalidAmount);
        }

        let mut totals: HashMap<PositionId, Amount> = HashMap::with_capacity(ids.len());
        for (&id, &amount) in ids.iter().zip(amounts) {
            if amount == 0 {
                return Err(PoolShareError::InvalidAmount);
            }
            let current = match totals.get(&id) {
                Some(total) => *total,
                None => self.position(id)?.accumulated_rewards,
            };
            totals.insert(id, safe_add_u128(current, amount)?);
        }
        Ok(totals)
    }

    /// Pay out a position's accrued rewards to its owner through `ledger`.
    ///
    /// The accrued amount is zeroed before the ledger is called, so a call
    /// that re-enters the registry during the transfer sees nothing left to
    /// claim. If the ledger refuses, the amount is put back on the position,
    /// together with anything added while the transfer was running.
    pub fn claim_rewards(
        &mut self,
        caller: &Address,
        id: PositionId,
        ledger: &mut dyn ValueLedger,
    ) -> CoreResult<Amount> {
        let (owner, amount) = self
            .plan_claim(caller, id)
            .map_err(|e| rejected("claim_rewards", caller, e))?;

        if let Some(position) = self.positions.get_mut(&id) {
            position.accumulated_rewards = 0;
        }

        // A re-entrant claim on the same id is rejected in plan_claim, so only
        // the outermost claim inserts and removes the guard.
        self.paying.insert(id);
        let outcome = ledger.transfer(self, &owner, amount);
        self.paying.remove(&id);

        if let Err(err) = outcome {
            if let Some(position) = self.positions.get_mut(&id) {
                position.accumulated_rewards = position.accumulated_rewards.saturating_add(amount);
            }
            warn!(position_id = id, owner = %owner, amount, error = %err, "reward payout failed");
            return Err(err.into());
        }

        info!(position_id = id, owner = %owner, amount, "rewards claimed");
        self.events.push(RegistryEvent::RewardsClaimed { id, owner, amount });
        Ok(amount)
    }

    fn plan_claim(&self, caller: &Address, id: PositionId) -> CoreResult<(Address, Amount)> {
        let position = self.owned_position(caller, id)?;
        if !position.has_rewards() {
            return Err(PoolShareError::NoRewardsToClaim(id));
        }
        if self.paying.contains(&id) {
            return Err(PoolShareError::PayoutInProgress(id));
        }
        Ok((position.owner, position.accumulated_rewards))
    }

    // ========================================================================
    // Split / merge
    // ========================================================================

    /// Split a position into one child per entry of `amounts`.
    ///
    /// `amounts` must be non-empty, free of zeros and sum to the principal.
    /// Share and rewards are divided in proportion to each amount; the last
    /// child takes the remainder so nothing is lost to rounding.
    pub fn split_position(
        &mut self,
        caller: &Address,
        id: PositionId,
        amounts: &[Amount],
    ) -> CoreResult<Vec<PositionId>> {
        let plan = self
            .plan_split(caller, id, amounts)
            .map_err(|e| rejected("split_position", caller, e))?;

        let new_ids: Vec<PositionId> = plan.children.iter().map(|child| child.id).collect();
        for child in plan.children {
            self.store(child);
        }
        self.unstore(plan.parent.id);

        info!(
            position_id = id,
            owner = %plan.parent.owner,
            children = new_ids.len(),
            "position split"
        );
        self.events.push(RegistryEvent::PositionSplit {
            id,
            new_ids: new_ids.clone(),
        });
        Ok(new_ids)
    }

    fn plan_split(&self, caller: &Address, id: PositionId, amounts: &[Amount]) -> CoreResult<SplitPlan> {
        let parent = self.settled_position(caller, id)?.clone();
        if amounts.is_empty() {
            return Err(PoolShareError::invalid_split("no amounts given"));
        }
        if amounts.contains(&0) {
            return Err(PoolShareError::invalid_split("zero amount"));
        }
        let total = checked_sum(amounts)
            .map_err(|_| PoolShareError::invalid_split("amounts overflow"))?;
        if total != parent.principal {
            return Err(PoolShareError::invalid_split("amounts must sum to principal"));
        }

        let shares = allocate_proportionally(parent.share_bps, amounts, parent.principal)?;
        let rewards = allocate_proportionally(parent.accumulated_rewards, amounts, parent.principal)?;
        let ids = self.reserve_ids(amounts.len())?;

        let children = ids
            .into_iter()
            .zip(amounts.iter().zip(shares.into_iter().zip(rewards)))
            .map(|(child_id, (&principal, (share_bps, accumulated_rewards)))| Position {
                id: child_id,
                owner: parent.owner,
                pool_id: parent.pool_id,
                principal,
                share_bps,
                created_at: parent.created_at,
                accumulated_rewards,
                parent_id: parent.id,
                is_derived: true,
            })
            .collect();

        Ok(SplitPlan { parent, children })
    }

    /// Merge several positions of one pool, all owned by the caller, into a
    /// single new position. Principal, share and rewards are summed with
    /// saturating addition; the earliest creation time is kept.
    pub fn merge_positions(&mut self, caller: &Address, ids: &[PositionId]) -> CoreResult<PositionId> {
        let plan = self
            .plan_merge(caller, ids)
            .map_err(|e| rejected("merge_positions", caller, e))?;

        let new_id = plan.merged.id;
        for input in &plan.inputs {
            self.unstore(*input);
        }
        info!(
            position_id = new_id,
            owner = %caller,
            inputs = plan.inputs.len(),
            principal = plan.merged.principal,
            "positions merged"
        );
        self.store(plan.merged);
        self.events.push(RegistryEvent::PositionsMerged {
            ids: plan.inputs,
            new_id,
        });
        Ok(new_id)
    }

    fn plan_merge(&self, caller: &Address, ids: &[PositionId]) -> CoreResult<MergePlan> {
        if ids.len() < MIN_MERGE_INPUTS {
            return Err(PoolShareError::InsufficientPositions {
                actual: ids.len(),
                min: MIN_MERGE_INPUTS,
            });
        }
        let mut seen = HashSet::with_capacity(ids.len());
        if !ids.iter().all(|id| seen.insert(*id)) {
            return Err(PoolShareError::IncompatiblePositions("duplicate position id"));
        }

        let mut inputs = Vec::with_capacity(ids.len());
        for &id in ids {
            inputs.push(self.settled_position(caller, id)?);
        }
        let pool_id = inputs[0].pool_id;
        if inputs.iter().any(|position| position.pool_id != pool_id) {
            return Err(PoolShareError::IncompatiblePositions(
                "positions belong to different pools",
            ));
        }

        let created_at = inputs
            .iter()
            .map(|position| position.created_at)
            .min()
            .unwrap_or_else(|| self.clock.unix_timestamp());
        let merged_id = self.reserve_ids(1)?[0];

        let merged = Position {
            id: merged_id,
            owner: *caller,
            pool_id,
            principal: saturating_sum(inputs.iter().map(|p| p.principal)),
            share_bps: saturating_sum(inputs.iter().map(|p| p.share_bps)),
            created_at,
            accumulated_rewards: saturating_sum(inputs.iter().map(|p| p.accumulated_rewards)),
            parent_id: NO_PARENT,
            is_derived: true,
        };

        Ok(MergePlan {
            inputs: ids.to_vec(),
            merged,
        })
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    pub(crate) fn position(&self, id: PositionId) -> CoreResult<&Position> {
        self.positions
            .get(&id)
            .ok_or(PoolShareError::PositionNotFound(id))
    }

    /// Position `id`, provided `caller` owns it
    fn owned_position(&self, caller: &Address, id: PositionId) -> CoreResult<&Position> {
        let position = self.position(id)?;
        if position.owner != *caller {
            return Err(PoolShareError::NotOwner(id));
        }
        Ok(position)
    }

    /// Position `id`, provided `caller` owns it and no payout on it is in
    /// flight
    fn settled_position(&self, caller: &Address, id: PositionId) -> CoreResult<&Position> {
        let position = self.owned_position(caller, id)?;
        if self.paying.contains(&id) {
            return Err(PoolShareError::PayoutInProgress(id));
        }
        Ok(position)
    }

    /// The next `count` ids, without consuming them. Fails if the counter
    /// would run past `u64::MAX`.
    fn reserve_ids(&self, count: usize) -> CoreResult<Vec<PositionId>> {
        let count = u64::try_from(count).map_err(|_| PoolShareError::MathOverflow)?;
        // The counter must stay representable after the last id is handed out
        safe_add_u64(self.next_id, count)?;
        Ok((self.next_id..self.next_id + count).collect())
    }

    /// Insert a position and index it. Advances the id counter past it.
    fn store(&mut self, position: Position) {
        let id = position.id;
        self.by_owner.insert(position.owner, id);
        self.by_pool.insert(position.pool_id, id);
        self.positions.insert(id, position);
        self.next_id = self.next_id.max(id + 1);
    }

    /// Remove a position and drop it from both indices
    fn unstore(&mut self, id: PositionId) -> Option<Position> {
        let position = self.positions.remove(&id)?;
        self.by_owner.remove(position.owner, id);
        self.by_pool.remove(position.pool_id, id);
        Some(position)
    }
}
