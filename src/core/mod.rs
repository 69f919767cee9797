//! Core scheduling roles: signal model, producer/consumer contracts, the pool.

pub mod consumer;
pub mod error;
pub mod pool;
pub mod producer;
pub mod shutdown;
pub mod signal;
pub mod wait_group;

pub use consumer::Consumer;
pub use error::PoolError;
pub use pool::{Pool, PoolState};
pub use producer::Producer;
pub use shutdown::ShutdownSignal;
pub use signal::Signal;
pub use wait_group::WaitGroup;
