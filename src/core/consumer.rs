//! The opaque work function invoked by pool workers.

/// A function invoked once per payload, possibly from several worker threads
/// at the same time.
///
/// Any `Fn(T) + Send + Sync` closure is a consumer via the blanket impl, so a
/// plain callable value is all a caller wires in. Implementations must not
/// assume any particular worker identity, and should return in bounded time
/// for [`Pool::stop`](crate::core::Pool::stop)'s drain guarantee to complete
/// promptly.
///
/// A panic inside a consumer is the caller's responsibility: the pool does
/// not trap it, but its slot accounting survives it (cleanup runs on worker
/// exit regardless of how the invocation terminates).
pub trait Consumer<T>: Send + Sync {
    /// Process one item.
    fn consume(&self, item: T);
}

impl<T, F> Consumer<T> for F
where
    F: Fn(T) + Send + Sync,
{
    fn consume(&self, item: T) {
        self(item);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[test]
    fn closures_are_consumers() {
        let total = AtomicI64::new(0);
        let consumer = |item: i64| {
            total.fetch_add(item, Ordering::Relaxed);
        };
        consumer.consume(5);
        consumer.consume(7);
        assert_eq!(total.load(Ordering::Relaxed), 12);
    }
}
