//! # Drainpool
//!
//! A bounded worker pool that pulls items from a producer and hands them to a
//! fixed number of concurrent consumer invocations.
//!
//! The crate is built around three roles:
//!
//! - **[`Producer`](core::Producer)**: a blocking source of [`Signal`](core::Signal)
//!   values, with two distinct termination operations: graceful `stop` (keep
//!   what was already produced) and `cancel` (discard it).
//! - **[`Consumer`](core::Consumer)**: an opaque, thread-safe function invoked
//!   once per payload. Any plain `Fn(T)` closure works.
//! - **[`Pool`](core::Pool)**: the scheduler. It owns a worker-availability
//!   pool sized exactly to the configured worker count; a free slot must be
//!   acquired before a new item is dispatched, which is the sole backpressure
//!   mechanism. There is no overflow queue at the pool layer; buffering, if
//!   any, lives inside the producer.
//!
//! ## Shutdown semantics
//!
//! Two tiers, neither of which interrupts a consumer invocation that is
//! already running:
//!
//! - [`Pool::stop`](core::Pool::stop) is the graceful drain. The producer stops
//!   accepting new items, everything already queued or in flight is processed,
//!   then the dispatch loop exits.
//! - [`Pool::cancel`](core::Pool::cancel) is immediate. The shutdown signal
//!   fires, queued-but-undelivered items are discarded, and nothing new is
//!   dispatched. Use [`Pool::wait`](core::Pool::wait) afterwards to rendezvous
//!   with in-flight work.
//!
//! ## Example
//!
//! ```rust,ignore
//! use drainpool::core::Pool;
//! use drainpool::infra::ChannelProducer;
//!
//! let producer = ChannelProducer::new(50);
//! producer.push(10);
//! producer.push(20);
//! producer.finish(); // in-band end-of-stream marker
//!
//! let pool = Pool::new(producer, |item: i32| println!("got {item}"), 4);
//!
//! // start() blocks until the stream is drained and in-flight work is done.
//! pool.start()?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core scheduling roles: signal model, producer/consumer contracts, the pool.
pub mod core;
/// Configuration models for pools.
pub mod config;
/// Builders to construct a pool from configuration.
pub mod builders;
/// Infrastructure adapters; concrete producer backends.
pub mod infra;
/// Shared utilities.
pub mod util;
