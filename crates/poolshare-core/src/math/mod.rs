//! # Mathematical Functions
//!
//! Pure integer math for proportional allocation and reward calculation.

pub mod big_int;
pub mod reward_math;
pub mod safe_math;

// Re-export commonly used functions
pub use big_int::*;
pub use reward_math::*;
pub use safe_math::*;
