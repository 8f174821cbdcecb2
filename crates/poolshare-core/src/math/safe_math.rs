//! # Safe Math Operations
//!
//! Overflow-checked and saturating arithmetic used by the registry.

use crate::errors::{CoreResult, PoolShareError};

/// Macro to generate safe arithmetic functions
macro_rules! safe_arith {
    // Binary operations with checked methods
    ($fn_name:ident, $type:ty, $checked_method:ident, $error:expr) => {
        /// Checked arithmetic returning a core error instead of wrapping
        pub fn $fn_name(a: $type, b: $type) -> CoreResult<$type> {
            a.$checked_method(b).ok_or($error)
        }
    };
}

safe_arith!(safe_add_u128, u128, checked_add, PoolShareError::MathOverflow);
safe_arith!(safe_sub_u128, u128, checked_sub, PoolShareError::MathUnderflow);
safe_arith!(safe_mul_u128, u128, checked_mul, PoolShareError::MathOverflow);

safe_arith!(safe_add_u64, u64, checked_add, PoolShareError::MathOverflow);

/// Checked sum of a slice of amounts
pub fn checked_sum(values: &[u128]) -> CoreResult<u128> {
    values
        .iter()
        .try_fold(0u128, |acc, value| safe_add_u128(acc, *value))
}

/// Saturating sum of a sequence of amounts; clamps at `u128::MAX` instead of
/// wrapping
pub fn saturating_sum<I>(values: I) -> u128
where
    I: IntoIterator<Item = u128>,
{
    values
        .into_iter()
        .fold(0u128, |acc, value| acc.saturating_add(value))
}
