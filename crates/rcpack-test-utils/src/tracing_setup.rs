//! Tracing initialisation helpers for tests.
//!
//! Call [`init_test_tracing`] at the top of any test that emits tracing events
//! and wants them captured by the test harness. Initialisation happens at most
//! once per process, so every test may call it.

use tracing_subscriber::EnvFilter;

/// Install a subscriber that writes to the test-harness writer and respects
/// `RUST_LOG` (default `debug` for the rcpack crates).
///
/// # Example
///
/// ```ignore
/// #[tokio::test]
/// async fn my_test() {
///     rcpack_test_utils::tracing_setup::init_test_tracing();
///     tracing::debug!("visible in captured output");
/// }
/// ```
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,rcpack_core=debug,rcpack_config=debug")),
        )
        .with_test_writer()
        .try_init();
}
