//! Builders to construct a pool from configuration.

pub mod pool_builder;

pub use pool_builder::PoolBuilder;
