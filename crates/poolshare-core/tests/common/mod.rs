//! Shared helpers for the integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod ledgers;
pub mod tracing;

pub use fixtures::*;
pub use ledgers::*;
pub use self::tracing::init_test_tracing;
