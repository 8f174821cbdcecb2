//! Accounts and registry builders shared by the scenarios

use poolshare_core::{Address, AuthorityRegistry, ManualClock, PositionRegistry};

use super::init_test_tracing;

pub const OWNER: Address = Address::new([1u8; 32]);
pub const MINTER: Address = Address::new([2u8; 32]);
pub const USER_A: Address = Address::new([0xa0; 32]);
pub const USER_B: Address = Address::new([0xb0; 32]);

pub const GENESIS: i64 = 1_700_000_000;

/// Registry with `MINTER` authorized and a manual clock at `GENESIS`
pub fn setup() -> (PositionRegistry, ManualClock) {
    init_test_tracing();
    let clock = ManualClock::new(GENESIS);
    let registry = PositionRegistry::new(
        AuthorityRegistry::with_minters(OWNER, [MINTER]),
        Box::new(clock.clone()),
    );
    (registry, clock)
}

pub fn registry() -> PositionRegistry {
    setup().0
}
