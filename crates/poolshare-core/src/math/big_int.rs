//! Big integer operations for proportional math
//!
//! Amounts are `u128`, so `amount * share` needs a 256-bit intermediate
//! before the division brings it back into range.

use crate::errors::{CoreResult, PoolShareError};

/// Rounding mode for division operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round down (towards zero)
    Down,
    /// Round up (away from zero)
    Up,
}

/// 256-bit unsigned integer for intermediate calculations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct U256 {
    /// Low 128 bits
    pub lo: u128,
    /// High 128 bits
    pub hi: u128,
}

const LO_MASK: u128 = u64::MAX as u128;

impl U256 {
    pub const ZERO: U256 = U256 { lo: 0, hi: 0 };

    /// Create a new U256 from low and high parts
    pub const fn new(lo: u128, hi: u128) -> Self {
        Self { lo, hi }
    }

    /// Create from a single u128 value
    pub const fn from_u128(value: u128) -> Self {
        Self { lo: value, hi: 0 }
    }

    /// Convert to u128, returning None if overflow
    pub fn to_u128(&self) -> Option<u128> {
        if self.hi == 0 {
            Some(self.lo)
        } else {
            None
        }
    }

    /// Multiply by a u128, returning None if the product exceeds 256 bits
    pub fn checked_mul_u128(&self, other: u128) -> Option<U256> {
        let low = mul_u128_to_u256(self.lo, other);
        let high = mul_u128_to_u256(self.hi, other);
        if high.hi != 0 {
            return None;
        }
        let hi = low.hi.checked_add(high.lo)?;
        Some(U256::new(low.lo, hi))
    }

    /// Divide by a non-zero u128, returning (quotient, remainder)
    pub fn div_rem_u128(&self, divisor: u128) -> Option<(U256, u128)> {
        if divisor == 0 {
            return None;
        }
        if self.hi == 0 {
            return Some((U256::from_u128(self.lo / divisor), self.lo % divisor));
        }

        // Restoring long division, one bit at a time. The remainder always
        // stays below the divisor, so the shifted value needs 129 bits and
        // the overflow flag carries the top one.
        let mut quotient = U256::ZERO;
        let mut remainder: u128 = 0;
        for bit in (0..256).rev() {
            let overflow = remainder >> 127 == 1;
            remainder = (remainder << 1) | self.bit(bit);
            if overflow || remainder >= divisor {
                remainder = remainder.wrapping_sub(divisor);
                quotient.set_bit(bit);
            }
        }
        Some((quotient, remainder))
    }

    fn bit(&self, index: u32) -> u128 {
        if index >= 128 {
            (self.hi >> (index - 128)) & 1
        } else {
            (self.lo >> index) & 1
        }
    }

    fn set_bit(&mut self, index: u32) {
        if index >= 128 {
            self.hi |= 1 << (index - 128);
        } else {
            self.lo |= 1 << index;
        }
    }
}

/// Multiply two u128 values and return the full 256-bit product
pub fn mul_u128_to_u256(a: u128, b: u128) -> U256 {
    let a_lo = a & LO_MASK;
    let a_hi = a >> 64;
    let b_lo = b & LO_MASK;
    let b_hi = b >> 64;

    let lo_lo = a_lo * b_lo;
    let lo_hi = a_lo * b_hi;
    let hi_lo = a_hi * b_lo;
    let hi_hi = a_hi * b_hi;

    // Each partial product fits in 128 bits; carry the middle column by hand
    let mid = (lo_lo >> 64) + (lo_hi & LO_MASK) + (hi_lo & LO_MASK);
    let lo = (lo_lo & LO_MASK) | (mid << 64);
    let hi = hi_hi + (lo_hi >> 64) + (hi_lo >> 64) + (mid >> 64);

    U256::new(lo, hi)
}

/// Multiply two values and divide by a third with specified rounding
/// result = (a * b) / denominator
pub fn mul_div_u128(a: u128, b: u128, denominator: u128, rounding: Rounding) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(PoolShareError::DivisionByZero);
    }

    let product = mul_u128_to_u256(a, b);
    let (quotient, remainder) = product
        .div_rem_u128(denominator)
        .ok_or(PoolShareError::DivisionByZero)?;

    let mut result = quotient.to_u128().ok_or(PoolShareError::MathOverflow)?;
    if rounding == Rounding::Up && remainder > 0 {
        result = result.checked_add(1).ok_or(PoolShareError::MathOverflow)?;
    }
    Ok(result)
}

/// Multiply three values and divide by a fourth, rounding down
/// result = (a * b * c) / denominator
pub fn mul_mul_div_u128(a: u128, b: u128, c: u128, denominator: u128) -> CoreResult<u128> {
    if denominator == 0 {
        return Err(PoolShareError::DivisionByZero);
    }

    let product = mul_u128_to_u256(a, b)
        .checked_mul_u128(c)
        .ok_or(PoolShareError::MathOverflow)?;
    let (quotient, _) = product
        .div_rem_u128(denominator)
        .ok_or(PoolShareError::DivisionByZero)?;

    quotient.to_u128().ok_or(PoolShareError::MathOverflow)
}
