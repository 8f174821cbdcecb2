//! # Reward Math
//!
//! Stateless reward distribution: proportional splits of a reward amount,
//! platform fees, time-based staking rewards and multipliers. All results are
//! floored integer math; where a total must be conserved, the last entry
//! absorbs the rounding dust.

use crate::constants::{BPS_DENOMINATOR, MAX_BPS, PERCENT_DENOMINATOR, SECONDS_PER_YEAR};
use crate::errors::{CoreResult, PoolShareError};
use crate::math::big_int::{mul_div_u128, mul_mul_div_u128, Rounding};
use crate::math::safe_math::{safe_add_u128, safe_mul_u128, safe_sub_u128};

/// Split `total` across `weights` in proportion to `weight / weight_sum`.
///
/// Every entry except the last is `floor(total * weight / weight_sum)`; the
/// last entry receives whatever is left, so the result always sums to
/// `total`. Which entry absorbs the dust depends only on input order.
pub fn allocate_proportionally(
    total: u128,
    weights: &[u128],
    weight_sum: u128,
) -> CoreResult<Vec<u128>> {
    if weight_sum == 0 {
        return Err(PoolShareError::DivisionByZero);
    }
    let Some((_, leading)) = weights.split_last() else {
        return Ok(Vec::new());
    };

    let mut allocations = Vec::with_capacity(weights.len());
    let mut allocated = 0u128;
    for weight in leading {
        let portion = mul_div_u128(total, *weight, weight_sum, Rounding::Down)?;
        allocated = safe_add_u128(allocated, portion)?;
        allocations.push(portion);
    }
    allocations.push(safe_sub_u128(total, allocated)?);

    Ok(allocations)
}

/// Distribute `reward_amount` across recipients holding `shares` out of
/// `total_share`. The result sums to `reward_amount` exactly; the last
/// recipient absorbs rounding dust.
pub fn calculate_rewards(
    shares: &[u128],
    total_share: u128,
    reward_amount: u128,
) -> CoreResult<Vec<u128>> {
    if total_share == 0 {
        return Err(PoolShareError::ZeroTotalShare);
    }
    if reward_amount == 0 {
        return Err(PoolShareError::ZeroRewardAmount);
    }
    if shares.is_empty() {
        return Err(PoolShareError::ZeroRecipients);
    }

    allocate_proportionally(reward_amount, shares, total_share)
}

/// Reward for a single recipient: `floor(reward_amount * share / total_share)`
pub fn calculate_reward(share: u128, total_share: u128, reward_amount: u128) -> CoreResult<u128> {
    if total_share == 0 {
        return Err(PoolShareError::ZeroTotalShare);
    }
    if reward_amount == 0 {
        return Err(PoolShareError::ZeroRewardAmount);
    }

    mul_div_u128(reward_amount, share, total_share, Rounding::Down)
}

fn check_fee_bps(fee_bps: u32) -> CoreResult<()> {
    if fee_bps > MAX_BPS {
        return Err(PoolShareError::invalid_parameter(
            "fee_bps",
            &format!("{} exceeds {}", fee_bps, MAX_BPS),
        ));
    }
    Ok(())
}

/// Platform fee: `floor(amount * fee_bps / 10000)`
pub fn calculate_platform_fee(amount: u128, fee_bps: u32) -> CoreResult<u128> {
    check_fee_bps(fee_bps)?;
    mul_div_u128(amount, fee_bps as u128, BPS_DENOMINATOR, Rounding::Down)
}

/// Amount left once the platform fee is taken out
pub fn calculate_amount_after_fee(amount: u128, fee_bps: u32) -> CoreResult<u128> {
    let fee = calculate_platform_fee(amount, fee_bps)?;
    safe_sub_u128(amount, fee)
}

/// Gross payment needed so that `value` is left after the fee on `value`
pub fn calculate_payment_amount(value: u128, fee_bps: u32) -> CoreResult<u128> {
    let fee = calculate_platform_fee(value, fee_bps)?;
    safe_add_u128(value, fee)
}

/// Time-based staking reward:
/// `floor(stake * duration * annual_rate_bps / (SECONDS_PER_YEAR * 10000))`
pub fn calculate_staking_reward(
    stake_amount: u128,
    duration_seconds: u64,
    annual_rate_bps: u32,
) -> CoreResult<u128> {
    if stake_amount == 0 || duration_seconds == 0 {
        return Ok(0);
    }

    let denominator = safe_mul_u128(SECONDS_PER_YEAR, BPS_DENOMINATOR)?;
    mul_mul_div_u128(
        stake_amount,
        duration_seconds as u128,
        annual_rate_bps as u128,
        denominator,
    )
}

/// Scale a base reward by a whole-percent multiplier (150 = 1.5x)
pub fn apply_recycling_multiplier(base_reward: u128, multiplier_pct: u32) -> CoreResult<u128> {
    mul_div_u128(
        base_reward,
        multiplier_pct as u128,
        PERCENT_DENOMINATOR,
        Rounding::Down,
    )
}

/// Quest bonus uses the same percentage scaling as recycling
pub fn calculate_quest_reward(base_reward: u128, multiplier_pct: u32) -> CoreResult<u128> {
    apply_recycling_multiplier(base_reward, multiplier_pct)
}

/// Sum of the three reward components
pub fn calculate_total_reward(base: u128, staking: u128, quest: u128) -> CoreResult<u128> {
    safe_add_u128(safe_add_u128(base, staking)?, quest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewards_sum_exactly() {
        let rewards = calculate_rewards(&[1, 1, 1], 3, 100).unwrap();
        assert_eq!(rewards, vec![33, 33, 34]);
        assert_eq!(rewards.iter().sum::<u128>(), 100);
    }

    #[test]
    fn test_last_recipient_absorbs_everything() {
        assert_eq!(calculate_rewards(&[0, 1], 1, 100).unwrap(), vec![0, 100]);
    }

    #[test]
    fn test_reward_zero_checks() {
        assert_eq!(calculate_rewards(&[1], 0, 100), Err(PoolShareError::ZeroTotalShare));
        assert_eq!(calculate_rewards(&[1], 1, 0), Err(PoolShareError::ZeroRewardAmount));
        assert_eq!(calculate_rewards(&[], 1, 100), Err(PoolShareError::ZeroRecipients));
        assert_eq!(calculate_reward(1, 0, 100), Err(PoolShareError::ZeroTotalShare));
        assert_eq!(calculate_reward(1, 1, 0), Err(PoolShareError::ZeroRewardAmount));
    }

    #[test]
    fn test_oversubscribed_shares_underflow() {
        // Leading shares already claim more than the whole reward
        assert_eq!(
            calculate_rewards(&[3, 3, 1], 4, 100),
            Err(PoolShareError::MathUnderflow)
        );
    }

    #[test]
    fn test_single_reward() {
        assert_eq!(calculate_reward(2500, 10_000, 1_001).unwrap(), 250);
        assert_eq!(calculate_reward(0, 10_000, 1_001).unwrap(), 0);
    }

    #[test]
    fn test_platform_fee() {
        assert_eq!(calculate_platform_fee(10_000, 250).unwrap(), 250);
        assert_eq!(calculate_platform_fee(99, 100).unwrap(), 0);
        assert_eq!(calculate_amount_after_fee(10_000, 250).unwrap(), 9_750);
        assert_eq!(calculate_payment_amount(10_000, 250).unwrap(), 10_250);
        assert!(calculate_platform_fee(1, 10_001).is_err());
    }

    #[test]
    fn test_staking_reward() {
        assert_eq!(calculate_staking_reward(0, 1_000, 500).unwrap(), 0);
        assert_eq!(calculate_staking_reward(1_000, 0, 500).unwrap(), 0);

        // One full year at 5% on 1,000,000
        let year = SECONDS_PER_YEAR as u64;
        assert_eq!(calculate_staking_reward(1_000_000, year, 500).unwrap(), 50_000);
        // Half a year floors the same way
        assert_eq!(calculate_staking_reward(1_000_000, year / 2, 500).unwrap(), 25_000);
    }

    #[test]
    fn test_multipliers_and_total() {
        assert_eq!(apply_recycling_multiplier(200, 150).unwrap(), 300);
        assert_eq!(calculate_quest_reward(33, 110).unwrap(), 36);
        assert_eq!(calculate_total_reward(1, 2, 3).unwrap(), 6);
        assert_eq!(
            calculate_total_reward(u128::MAX, 1, 0),
            Err(PoolShareError::MathOverflow)
        );
    }

    #[test]
    fn test_allocate_proportionally_with_zero_total() {
        assert_eq!(allocate_proportionally(0, &[400, 600], 1_000).unwrap(), vec![0, 0]);
        assert_eq!(
            allocate_proportionally(10_000, &[400, 600], 1_000).unwrap(),
            vec![4_000, 6_000]
        );
        assert!(allocate_proportionally(5, &[], 1).unwrap().is_empty());
    }
}
