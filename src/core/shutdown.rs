//! Re-armable shutdown latch observable from `select!`.

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;

/// One generation of the latch. Dropping the kept sender disconnects every
/// cloned receiver, which makes their `recv` operation ready immediately.
struct Gate {
    keep: Option<Sender<()>>,
    observe: Receiver<()>,
}

impl Gate {
    fn armed() -> Self {
        let (tx, rx) = bounded::<()>(0);
        Self {
            keep: Some(tx),
            observe: rx,
        }
    }
}

/// A shutdown signal that can be fired once per generation and re-armed.
///
/// Firing is idempotent and linearizable: the transition happens under a
/// single mutex, and concurrent callers observe exactly one flip. Observers
/// hold a [`Receiver`] that never yields a message; it disconnects when the
/// signal fires, so it composes with `crossbeam_channel::select!` alongside
/// ordinary data channels.
pub struct ShutdownSignal {
    gate: Mutex<Gate>,
}

impl ShutdownSignal {
    /// Create an armed (not yet fired) signal.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gate: Mutex::new(Gate::armed()),
        }
    }

    /// Fire the signal. Idempotent.
    pub fn fire(&self) {
        self.gate.lock().keep = None;
    }

    /// Whether the current generation has fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.gate.lock().keep.is_none()
    }

    /// A receiver for the current generation. `recv` blocks until the signal
    /// fires, then returns `Err(RecvError)` immediately and forever after.
    #[must_use]
    pub fn observe(&self) -> Receiver<()> {
        self.gate.lock().observe.clone()
    }

    /// Replace the fired generation with a fresh, armed one.
    ///
    /// Receivers obtained before the re-arm keep observing the old
    /// generation; callers take a fresh receiver per run.
    pub fn rearm(&self) {
        *self.gate.lock() = Gate::armed();
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
