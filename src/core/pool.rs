//! The scheduler: fixed worker count, FIFO dispatch, two-tier shutdown.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{bounded, select, Receiver, Sender};
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::core::{Consumer, PoolError, Producer, ShutdownSignal, Signal, WaitGroup};

/// Lifecycle state of a [`Pool`].
///
/// `Stopped` and `Cancelled` are terminal unless [`Pool::restart`] re-arms
/// the shutdown signal and transitions back through `Created` to `Running`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolState {
    /// Constructed, dispatch loop not yet running.
    Created,
    /// The dispatch loop is running.
    Running,
    /// Exited after a graceful drain.
    Stopped,
    /// Exited after an immediate cancellation.
    Cancelled,
}

/// Unit token representing one free worker slot.
struct Slot;

/// Returns the slot and decrements the in-flight count when a worker exits,
/// no matter how the consumer invocation terminated. Slots are not
/// replenished once the pool has been cancelled.
struct SlotGuard {
    slot_tx: Sender<Slot>,
    state: Arc<Mutex<PoolState>>,
    in_flight: Arc<WaitGroup>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        if *self.state.lock() != PoolState::Cancelled {
            // Cannot fail: the channel holds exactly as many tokens as there
            // are workers and this worker's token was taken at dispatch.
            let _ = self.slot_tx.try_send(Slot);
        }
        self.in_flight.done();
    }
}

/// A bounded worker-pool scheduler.
///
/// Pulls [`Signal`] values from a [`Producer`] and dispatches payloads to at
/// most `workers` concurrent [`Consumer`] invocations. Dispatch preserves the
/// producer's emission order; completions race. A free worker slot must be
/// acquired before each dispatch. This is the sole backpressure point; there
/// is no overflow queue at the pool layer.
///
/// [`start`](Self::start) is blocking by design: it runs the dispatch loop on
/// the calling thread and returns only after the loop has exited *and* every
/// in-flight worker has completed. Control operations (`stop`, `cancel`,
/// `wait`) are called from other threads through `&self`.
///
/// A pool built with `workers == 0` dispatches nothing: the first payload
/// blocks on slot acquisition until either [`stop`](Self::stop) or
/// [`cancel`](Self::cancel) releases it, and is then dropped.
pub struct Pool<T, P, C> {
    producer: Arc<P>,
    consumer: Arc<C>,
    workers: usize,
    slot_tx: Sender<Slot>,
    slot_rx: Receiver<Slot>,
    shutdown: ShutdownSignal,
    in_flight: Arc<WaitGroup>,
    state: Arc<Mutex<PoolState>>,
    worker_seq: AtomicU64,
    _item: PhantomData<fn(T)>,
}

impl<T, P, C> Pool<T, P, C>
where
    T: Send + 'static,
    P: Producer<T>,
    C: Consumer<T> + 'static,
{
    /// Create a pool over `producer` and `consumer` with a fixed worker
    /// count. The worker-availability pool is populated immediately.
    pub fn new(producer: P, consumer: C, workers: usize) -> Self {
        let (slot_tx, slot_rx) = bounded(workers);
        for _ in 0..workers {
            let _ = slot_tx.try_send(Slot);
        }
        Self {
            producer: Arc::new(producer),
            consumer: Arc::new(consumer),
            workers,
            slot_tx,
            slot_rx,
            shutdown: ShutdownSignal::new(),
            in_flight: Arc::new(WaitGroup::new()),
            state: Arc::new(Mutex::new(PoolState::Created)),
            worker_seq: AtomicU64::new(0),
            _item: PhantomData,
        }
    }

    /// Run the dispatch loop on the calling thread.
    ///
    /// Repeatedly pulls from the producer: [`Signal::Empty`] loops without
    /// dispatch, [`Signal::EndOfStream`] ends the run, and a payload is
    /// dispatched to a fresh worker thread once a slot is free. On any exit
    /// the producer is stopped, the shutdown signal is fired, and the call
    /// returns only after in-flight workers have finished.
    ///
    /// # Errors
    ///
    /// [`PoolError::AlreadyCancelled`] when the shutdown signal has already
    /// fired and [`restart`](Self::restart) has not re-armed it.
    pub fn start(&self) -> Result<(), PoolError> {
        {
            let mut state = self.state.lock();
            if self.shutdown.is_fired() {
                return Err(PoolError::AlreadyCancelled);
            }
            *state = PoolState::Running;
        }

        // Top up slots consumed by a previous cancelled run.
        while self.slot_tx.try_send(Slot).is_ok() {}

        info!(workers = self.workers, "pool started");
        self.dispatch_loop();

        self.producer.stop();
        self.shutdown.fire();
        self.in_flight.wait();

        {
            let mut state = self.state.lock();
            if *state != PoolState::Cancelled {
                *state = PoolState::Stopped;
            }
            info!(state = ?*state, "pool exited");
        }
        Ok(())
    }

    fn dispatch_loop(&self) {
        let pool_shutdown = self.shutdown.observe();
        let source_shutdown = self.producer.shutdown_signal();

        loop {
            if self.shutdown.is_fired() {
                return;
            }
            match self.producer.produce() {
                Signal::Empty => {}
                Signal::EndOfStream => {
                    debug!("end of stream observed");
                    return;
                }
                Signal::Payload(item) => {
                    // Backpressure point: block until a worker slot frees up
                    // or a shutdown signal releases us. An item pulled but
                    // not dispatched when cancellation fires is dropped.
                    let acquired = select! {
                        recv(self.slot_rx) -> slot => slot.is_ok(),
                        recv(pool_shutdown) -> _ => false,
                        recv(source_shutdown) -> _ => false,
                    };
                    if !acquired || self.shutdown.is_fired() {
                        return;
                    }
                    self.dispatch(item);
                }
            }
        }
    }

    /// Spawn a transient worker thread bound to one in-flight item.
    fn dispatch(&self, item: T) {
        self.in_flight.add(1);
        let seq = self.worker_seq.fetch_add(1, Ordering::Relaxed);
        let consumer = Arc::clone(&self.consumer);
        let guard = SlotGuard {
            slot_tx: self.slot_tx.clone(),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
        };

        let spawned = thread::Builder::new()
            .name(format!("dp-worker-{seq}"))
            .spawn(move || {
                let _slot = guard;
                consumer.consume(item);
            });
        if let Err(error) = spawned {
            // The closure is dropped on failure, running the guard so the
            // slot and in-flight count stay consistent.
            warn!(%error, "failed to spawn worker thread");
        }
    }

    /// Graceful drain.
    ///
    /// Instructs the producer to stop producing new items, then blocks until
    /// the dispatch loop has drained the stream to exhaustion and every
    /// dispatched item has been processed. In-flight work is never
    /// interrupted. Safe to call concurrently with [`start`](Self::start)
    /// and with running workers; calling it twice is a no-op. A pool with no
    /// workers has nothing to drain, so its dispatch loop is released
    /// directly and any payload it pulled is dropped.
    ///
    /// # Errors
    ///
    /// Currently always succeeds; the `Result` mirrors the other lifecycle
    /// operations.
    pub fn stop(&self) -> Result<(), PoolError> {
        self.producer.stop();

        {
            let mut state = self.state.lock();
            if *state == PoolState::Created {
                // Never started; there is no loop to drain.
                *state = PoolState::Stopped;
                drop(state);
                self.shutdown.fire();
                self.in_flight.wait();
                return Ok(());
            }
        }

        if self.workers == 0 {
            // No slot can ever free up, so the loop may be parked on slot
            // acquisition holding a payload. Nothing was or can be
            // dispatched; firing the signal loses no in-flight work.
            self.shutdown.fire();
        }

        // The dispatch loop fires the signal when it exits; recv unblocks on
        // disconnect, immediately so when the signal already fired.
        let _ = self.shutdown.observe().recv();
        self.in_flight.wait();
        Ok(())
    }

    /// Immediate cancellation.
    ///
    /// Fires the shutdown signal, releasing a dispatch loop blocked on the
    /// producer or on slot acquisition, and instructs the producer to
    /// discard queued-but-undelivered items. Items already dispatched run to
    /// completion; nothing new is dispatched, and their slots are not
    /// replenished. Does not wait: use [`wait`](Self::wait) to rendezvous
    /// with in-flight work. Idempotent.
    ///
    /// # Errors
    ///
    /// Currently always succeeds; the `Result` mirrors the other lifecycle
    /// operations.
    pub fn cancel(&self) -> Result<(), PoolError> {
        {
            let mut state = self.state.lock();
            *state = PoolState::Cancelled;
        }
        info!("pool cancelled");
        self.shutdown.fire();
        self.producer.cancel();
        Ok(())
    }

    /// Block until every currently tracked worker has completed. Stops
    /// nothing by itself.
    pub fn wait(&self) {
        self.in_flight.wait();
    }

    /// Gracefully stop, re-arm the shutdown signal, and start again.
    ///
    /// The producer is stopped by the inner [`stop`](Self::stop); callers
    /// refresh its state first (for example with
    /// [`ChannelProducer::reopen`](crate::infra::ChannelProducer::reopen))
    /// so the new run has items to drain.
    ///
    /// # Errors
    ///
    /// Propagates failures from either phase.
    pub fn restart(&self) -> Result<(), PoolError> {
        self.stop()?;
        self.shutdown.rearm();
        {
            let mut state = self.state.lock();
            *state = PoolState::Created;
        }
        info!("pool restarting");
        self.start()
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> PoolState {
        *self.state.lock()
    }

    /// The configured worker count.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ChannelProducer;
    use std::sync::atomic::AtomicI64;

    #[test]
    fn created_pool_reports_state() {
        let pool = Pool::new(ChannelProducer::<i32>::new(4), |_item: i32| {}, 2);
        assert_eq!(pool.state(), PoolState::Created);
        assert_eq!(pool.workers(), 2);
    }

    #[test]
    fn start_after_cancel_fails() {
        let pool = Pool::new(ChannelProducer::<i32>::new(4), |_item: i32| {}, 2);
        pool.cancel().unwrap();
        assert!(matches!(pool.start(), Err(PoolError::AlreadyCancelled)));
        assert_eq!(pool.state(), PoolState::Cancelled);
    }

    #[test]
    fn in_band_end_of_stream_drains_and_returns() {
        let total = Arc::new(AtomicI64::new(0));
        let producer = ChannelProducer::new(8);
        for item in [1i64, 2, 3] {
            assert!(producer.push(item));
        }
        assert!(producer.finish());

        let sink = Arc::clone(&total);
        let pool = Pool::new(producer, move |item: i64| {
            sink.fetch_add(item, Ordering::Relaxed);
        }, 2);

        pool.start().unwrap();
        assert_eq!(total.load(Ordering::Relaxed), 6);
        assert_eq!(pool.state(), PoolState::Stopped);
    }

    #[test]
    fn stop_on_never_started_pool_returns() {
        let pool = Pool::new(ChannelProducer::<i32>::new(4), |_item: i32| {}, 2);
        pool.stop().unwrap();
        assert_eq!(pool.state(), PoolState::Stopped);
        assert!(matches!(pool.start(), Err(PoolError::AlreadyCancelled)));
    }
}
