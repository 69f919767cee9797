//! The data-source contract consumed by the pool.

use crossbeam_channel::Receiver;

use crate::core::Signal;

/// A blocking source of [`Signal`] values with two-tier termination.
///
/// Lifecycle: *Active* → *Stopping* (graceful, via [`stop`](Self::stop)) or
/// *Cancelling* (discard, via [`cancel`](Self::cancel)) → *Terminated*.
/// Once terminated, [`produce`](Self::produce) must not block forever: it
/// yields [`Signal::EndOfStream`] so the dispatch loop can exit. The pool
/// relies on exactly one terminal indication per stream.
///
/// Implementations are shared between the dispatch loop and control threads,
/// hence the `Send + Sync` bound. `stop` and `cancel` are best-effort
/// signals, not operations that fail.
pub trait Producer<T>: Send + Sync {
    /// Yield the next signal, blocking until an item is available, a shutdown
    /// signal fires, or the stream ends.
    fn produce(&self) -> Signal<T>;

    /// Stop producing new items. Anything already queued remains
    /// retrievable through [`produce`](Self::produce). Idempotent and safe
    /// under concurrent callers.
    fn stop(&self);

    /// [`stop`](Self::stop) semantics, plus: discard every item queued but
    /// not yet retrieved, and release any caller blocked inside
    /// [`produce`](Self::produce) with [`Signal::EndOfStream`] immediately
    /// rather than after draining.
    fn cancel(&self);

    /// A channel that disconnects when [`cancel`](Self::cancel) fires.
    ///
    /// The pool selects over this while waiting for a free worker slot, so a
    /// cancellation issued from another thread releases it promptly.
    fn shutdown_signal(&self) -> Receiver<()>;
}

/// Producers are shared by reference-counting: a caller keeps one handle to
/// feed the source while the pool owns another.
impl<T, P: Producer<T>> Producer<T> for std::sync::Arc<P> {
    fn produce(&self) -> Signal<T> {
        self.as_ref().produce()
    }

    fn stop(&self) {
        self.as_ref().stop();
    }

    fn cancel(&self) {
        self.as_ref().cancel();
    }

    fn shutdown_signal(&self) -> Receiver<()> {
        self.as_ref().shutdown_signal()
    }
}
