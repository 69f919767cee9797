//! Assemble a [`Pool`] from configuration plus live producer/consumer values.

use std::marker::PhantomData;

use crate::config::PoolConfig;
use crate::core::{Consumer, Pool, PoolError, Producer};

/// Builder wiring a producer and a consumer to a worker count.
///
/// ```rust,ignore
/// let pool = PoolBuilder::from_config(&cfg)
///     .producer(ChannelProducer::new(cfg.queue_capacity))
///     .consumer(|item: u64| process(item))
///     .build()?;
/// ```
pub struct PoolBuilder<T, P, C> {
    config: PoolConfig,
    producer: Option<P>,
    consumer: Option<C>,
    _item: PhantomData<fn(T)>,
}

impl<T, P, C> PoolBuilder<T, P, C>
where
    T: Send + 'static,
    P: Producer<T>,
    C: Consumer<T> + 'static,
{
    /// Start from default sizing.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&PoolConfig::default())
    }

    /// Take sizing from a configuration. Validation happens in
    /// [`build`](Self::build).
    #[must_use]
    pub fn from_config(cfg: &PoolConfig) -> Self {
        Self {
            config: cfg.clone(),
            producer: None,
            consumer: None,
            _item: PhantomData,
        }
    }

    /// Override the worker count.
    #[must_use]
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Set the data source.
    #[must_use]
    pub fn producer(mut self, producer: P) -> Self {
        self.producer = Some(producer);
        self
    }

    /// Set the work function.
    #[must_use]
    pub fn consumer(mut self, consumer: C) -> Self {
        self.consumer = Some(consumer);
        self
    }

    /// Build the pool.
    ///
    /// # Errors
    ///
    /// [`PoolError::InvalidConfig`] when the configuration fails
    /// [`PoolConfig::validate`] or the producer or consumer is missing.
    pub fn build(self) -> Result<Pool<T, P, C>, PoolError> {
        self.config.validate().map_err(PoolError::InvalidConfig)?;
        let producer = self
            .producer
            .ok_or_else(|| PoolError::InvalidConfig("producer is required".into()))?;
        let consumer = self
            .consumer
            .ok_or_else(|| PoolError::InvalidConfig("consumer is required".into()))?;
        Ok(Pool::new(producer, consumer, self.config.workers))
    }
}

impl<T, P, C> Default for PoolBuilder<T, P, C>
where
    T: Send + 'static,
    P: Producer<T>,
    C: Consumer<T> + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ChannelProducer;

    #[test]
    fn builds_with_all_components() {
        let pool = PoolBuilder::new()
            .workers(2)
            .producer(ChannelProducer::<u32>::new(8))
            .consumer(|_item: u32| {})
            .build()
            .unwrap();
        assert_eq!(pool.workers(), 2);
    }

    #[test]
    fn invalid_config_rejected_at_build() {
        let cfg = PoolConfig {
            workers: 2,
            queue_capacity: 0,
        };
        let result = PoolBuilder::from_config(&cfg)
            .producer(ChannelProducer::<u32>::new(8))
            .consumer(|_item: u32| {})
            .build();
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
    }

    #[test]
    fn missing_components_rejected() {
        let result = PoolBuilder::<u32, ChannelProducer<u32>, fn(u32)>::new().build();
        assert!(matches!(result, Err(PoolError::InvalidConfig(_))));
    }
}
