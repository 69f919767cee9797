//! Error types for pool operations.

use thiserror::Error;

/// Errors surfaced by [`Pool`](crate::core::Pool) lifecycle operations.
///
/// Double `stop()` or `cancel()` are idempotent no-ops, not failures; the
/// only user-visible failure is starting a pool whose shutdown signal has
/// already fired, plus configuration rejection at build time.
#[derive(Debug, Error)]
pub enum PoolError {
    /// The pool's shutdown signal already fired and `restart()` has not
    /// re-armed it.
    #[error("pool is already cancelled")]
    AlreadyCancelled,
    /// Configuration validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
