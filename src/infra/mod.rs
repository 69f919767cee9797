//! Infrastructure adapters; concrete producer backends.

pub mod channel;

pub use channel::ChannelProducer;
