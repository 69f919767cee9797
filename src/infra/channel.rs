//! Channel-backed producer: a bounded FIFO buffer feeding the pool.

use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::Mutex;
use tracing::debug;

use crate::core::{Producer, ShutdownSignal, Signal};

/// One generation of the backing buffer. The sender lives in an `Option` so
/// closing for writes is a take under the mutex, idempotent and safe with
/// concurrent callers.
struct Buffer<T> {
    tx: Option<Sender<Signal<T>>>,
    rx: Receiver<Signal<T>>,
    capacity: usize,
}

impl<T> Buffer<T> {
    fn open(capacity: usize) -> Self {
        let (tx, rx) = bounded(capacity);
        Self {
            tx: Some(tx),
            rx,
            capacity,
        }
    }
}

/// The reference [`Producer`]: a bounded, ordered buffer of capacity `C`
/// plus an independent shutdown signal.
///
/// [`push`](Self::push) appends and blocks when the buffer is full, so
/// bounded-queue backpressure propagates to whoever feeds the producer.
/// [`produce`](Producer::produce) dequeues FIFO. After [`stop`](Producer::stop)
/// the buffer keeps draining until empty, then yields
/// [`Signal::EndOfStream`]; after [`cancel`](Producer::cancel) it yields
/// `EndOfStream` immediately regardless of buffered content.
///
/// The stream end can also be marked in-band with [`finish`](Self::finish).
/// Items pushed after the in-band marker but before the pool observes it are
/// stranded in the then-closed buffer and never delivered.
pub struct ChannelProducer<T> {
    buffer: Mutex<Buffer<T>>,
    shutdown: ShutdownSignal,
}

impl<T: Send> ChannelProducer<T> {
    /// Create a producer with a bounded buffer of the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Mutex::new(Buffer::open(capacity)),
            shutdown: ShutdownSignal::new(),
        }
    }

    /// Append one item, blocking while the buffer is full. Returns `false`
    /// when the producer has already been stopped and the item was not
    /// accepted.
    pub fn push(&self, item: T) -> bool {
        self.send(Signal::Payload(item))
    }

    /// Append the in-band end-of-stream marker. Items already buffered ahead
    /// of it are still delivered; anything pushed behind it is stranded.
    pub fn finish(&self) -> bool {
        self.send(Signal::EndOfStream)
    }

    fn send(&self, signal: Signal<T>) -> bool {
        // Clone the sender under a brief lock, then block outside it so a
        // concurrent cancel() can take the lock and drain the buffer.
        let tx = { self.buffer.lock().tx.clone() };
        tx.is_some_and(|tx| tx.send(signal).is_ok())
    }

    /// Number of items currently buffered and undelivered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.lock().rx.len()
    }

    /// Whether the buffer has been closed for new writes.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.buffer.lock().tx.is_none()
    }

    /// Discard the terminated buffer and open a fresh one at the original
    /// capacity, re-arming the shutdown signal. Used before
    /// [`Pool::restart`](crate::core::Pool::restart) to give the new run a
    /// live stream.
    pub fn reopen(&self) {
        let mut buffer = self.buffer.lock();
        let capacity = buffer.capacity;
        *buffer = Buffer::open(capacity);
        self.shutdown.rearm();
        debug!("channel producer reopened");
    }
}

impl<T: Send> Producer<T> for ChannelProducer<T> {
    fn produce(&self) -> Signal<T> {
        let (rx, fired) = {
            let buffer = self.buffer.lock();
            (buffer.rx.clone(), self.shutdown.is_fired())
        };
        if fired {
            return Signal::EndOfStream;
        }
        let observe = self.shutdown.observe();
        select! {
            recv(observe) -> _ => Signal::EndOfStream,
            recv(rx) -> signal => signal.unwrap_or(Signal::EndOfStream),
        }
    }

    fn stop(&self) {
        self.buffer.lock().tx = None;
    }

    fn cancel(&self) {
        self.shutdown.fire();
        self.stop();
        // Drain and discard whatever is still buffered so late writers do
        // not block forever on a full buffer.
        let rx = { self.buffer.lock().rx.clone() };
        let mut discarded = 0usize;
        while rx.try_recv().is_ok() {
            discarded += 1;
        }
        if discarded > 0 {
            debug!(discarded, "discarded buffered items on cancel");
        }
    }

    fn shutdown_signal(&self) -> Receiver<()> {
        self.shutdown.observe()
    }
}
