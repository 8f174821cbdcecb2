//! # Core Type Definitions
//!
//! Addresses, positions, aggregate statistics and registry events.

pub mod address;
pub mod events;
pub mod position;
pub mod stats;

// Re-export all types
pub use address::*;
pub use events::*;
pub use position::*;
pub use stats::*;
