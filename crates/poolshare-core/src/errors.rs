//! # Core Error Types
//!
//! Every fallible registry, distributor and configuration operation returns a
//! `PoolShareError`. Errors always abort the whole operation; nothing is
//! committed before the last fallible step has passed.

use thiserror::Error;

use crate::types::PositionId;

/// Errors raised by the external value ledger during a payout
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient ledger balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("Ledger rejected transfer: {0}")]
    Rejected(String),
}

/// Broad classification of a failure, used by callers that only care about
/// which class of problem occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input: zero amounts, mismatched lengths, split sum mismatch
    Validation,
    /// Caller lacks the required role or does not own the position
    Authorization,
    /// Referenced position is absent
    NotFound,
    /// Operation is not valid for the current state of the positions
    State,
    /// Arithmetic could not be represented
    Math,
    /// The external ledger refused the payout
    External,
    /// Configuration could not be loaded or is invalid
    Configuration,
}

/// Core registry errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolShareError {
    // ========================================================================
    // Validation Errors
    // ========================================================================

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid split: {0}")]
    InvalidSplit(&'static str),

    #[error("Length mismatch: {0} ids, {1} amounts")]
    LengthMismatch(usize, usize),

    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Total share is zero")]
    ZeroTotalShare,

    #[error("Reward amount is zero")]
    ZeroRewardAmount,

    #[error("No recipients")]
    ZeroRecipients,

    // ========================================================================
    // Authorization Errors
    // ========================================================================

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Caller does not own position {0}")]
    NotOwner(PositionId),

    // ========================================================================
    // Lookup Errors
    // ========================================================================

    #[error("Position {0} not found")]
    PositionNotFound(PositionId),

    // ========================================================================
    // State Errors
    // ========================================================================

    #[error("No rewards to claim on position {0}")]
    NoRewardsToClaim(PositionId),

    #[error("Merge needs at least {min} positions, got {actual}")]
    InsufficientPositions { actual: usize, min: usize },

    #[error("Incompatible positions: {0}")]
    IncompatiblePositions(&'static str),

    #[error("Position {0} still has unclaimed rewards")]
    UnclaimedRewards(PositionId),

    #[error("Payout in progress on position {0}")]
    PayoutInProgress(PositionId),

    // ========================================================================
    // Math Errors
    // ========================================================================

    #[error("Math overflow")]
    MathOverflow,

    #[error("Math underflow")]
    MathUnderflow,

    #[error("Division by zero")]
    DivisionByZero,

    // ========================================================================
    // External and Configuration Errors
    // ========================================================================

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type using core errors
pub type CoreResult<T> = Result<T, PoolShareError>;

impl PoolShareError {
    /// Classify the error into its taxonomy bucket
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAmount
            | Self::InvalidSplit(_)
            | Self::LengthMismatch(..)
            | Self::InvalidParameter { .. }
            | Self::ZeroTotalShare
            | Self::ZeroRewardAmount
            | Self::ZeroRecipients => ErrorKind::Validation,
            Self::Unauthorized | Self::NotOwner(_) => ErrorKind::Authorization,
            Self::PositionNotFound(_) => ErrorKind::NotFound,
            Self::NoRewardsToClaim(_)
            | Self::InsufficientPositions { .. }
            | Self::IncompatiblePositions(_)
            | Self::UnclaimedRewards(_)
            | Self::PayoutInProgress(_) => ErrorKind::State,
            Self::MathOverflow | Self::MathUnderflow | Self::DivisionByZero => ErrorKind::Math,
            Self::Ledger(_) => ErrorKind::External,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Create an invalid parameter error with a reason
    pub fn invalid_parameter(name: &'static str, reason: &str) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.to_string(),
        }
    }

    /// Create an invalid split error with reason
    pub fn invalid_split(reason: &'static str) -> Self {
        Self::InvalidSplit(reason)
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }
}
