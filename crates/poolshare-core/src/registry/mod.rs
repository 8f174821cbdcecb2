//! # Position Registry
//!
//! Stateful half of the crate: the registry itself, the authority set it is
//! built with, its indices, and the seams to the outside world (clock and
//! value ledger).

pub mod authority;
pub mod clock;
pub mod index;
pub mod ledger;
pub mod position_registry;
pub mod queries;

pub use authority::AuthorityRegistry;
pub use clock::{Clock, ManualClock, SystemClock};
pub use index::{PositionIndex, PositionSet};
pub use ledger::{InMemoryLedger, ValueLedger};
pub use position_registry::PositionRegistry;
