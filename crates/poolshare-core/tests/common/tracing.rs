//! Tracing configuration for tests

use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests
///
/// Honors `RUST_LOG`, defaults to `info` for this crate. Safe to call from
/// every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,poolshare_core=info"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .init();
    });
}
