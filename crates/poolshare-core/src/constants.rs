//! # Protocol Constants
//!
//! Fundamental constants for the position registry including:
//! - Ratio denominators (basis points, percentages)
//! - Time constants used by staking accrual
//! - Identifier and pagination defaults

// ============================================================================
// Ratio Constants
// ============================================================================

/// Basis points denominator (10,000 = 100%)
pub const BPS_DENOMINATOR: u128 = 10_000;

/// Maximum percentage in basis points (100%)
pub const MAX_BPS: u32 = 10_000;

/// Denominator for whole-percent multipliers (100 = 1.0x)
pub const PERCENT_DENOMINATOR: u128 = 100;

// ============================================================================
// Time Constants
// ============================================================================

/// Seconds in a (non-leap) year, used for annualized staking rates
pub const SECONDS_PER_YEAR: u128 = 365 * 24 * 60 * 60;

// ============================================================================
// Registry Constants
// ============================================================================

/// First identifier handed out by a fresh registry. Zero is reserved to mean
/// "no parent" in `Position::parent_id`.
pub const FIRST_POSITION_ID: u64 = 1;

/// Parent id recorded on positions that were not derived from a single parent
pub const NO_PARENT: u64 = 0;

/// Page size used by callers that do not pick one
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Minimum number of inputs accepted by a merge
pub const MIN_MERGE_INPUTS: usize = 2;
