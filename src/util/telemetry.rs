//! Process-wide logging setup.

use tracing_subscriber::EnvFilter;

/// Install an env-filtered fmt subscriber unless one is already set.
///
/// Library code only emits `tracing` events. Embedding applications that
/// configure their own subscriber are left alone; demos and tests call this
/// to get readable output driven by `RUST_LOG`.
pub fn init_tracing() {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
