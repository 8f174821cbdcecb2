//! # PoolShare Core - Revenue Pool Positions
//!
//! Tracks fractional positions in shared revenue pools and pays out the
//! rewards they accrue. It provides:
//!
//! - A position registry with owner and pool indices, split, merge, burn,
//!   transfer and claim operations that either fully commit or change nothing
//! - Stateless reward math with exact conservation of split amounts
//! - An injected authority set gating minting and reward accrual
//! - TOML configuration for wiring a registry and its reward rates
//!
//! Funds never live in the registry. Claims are paid through a
//! [`registry::ValueLedger`] supplied by the caller.

pub mod config;
pub mod constants;
pub mod errors;
pub mod math;
pub mod registry;
pub mod types;

// Re-export commonly used items
pub use config::{RegistryConfig, RewardPolicy};
pub use constants::*;
pub use errors::{CoreResult, ErrorKind, LedgerError, PoolShareError};
pub use registry::{
    AuthorityRegistry, Clock, InMemoryLedger, ManualClock, PositionRegistry, SystemClock,
    ValueLedger,
};
pub use types::*;
