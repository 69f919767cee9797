//! Rendezvous with outstanding worker executions.

use parking_lot::{Condvar, Mutex};

/// Counts in-flight workers and lets callers block until they all finish.
///
/// `add` happens on the dispatch thread before a worker is spawned, `done`
/// inside the worker's Drop guard, so the count never observes a spawned
/// worker it could miss.
pub struct WaitGroup {
    count: Mutex<usize>,
    zero: Condvar,
}

impl WaitGroup {
    /// Create an empty wait group.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Mutex::new(0),
            zero: Condvar::new(),
        }
    }

    /// Track `n` additional executions.
    pub fn add(&self, n: usize) {
        *self.count.lock() += n;
    }

    /// Mark one execution finished, waking waiters when the count hits zero.
    pub fn done(&self) {
        let mut count = self.count.lock();
        *count = count.saturating_sub(1);
        if *count == 0 {
            self.zero.notify_all();
        }
    }

    /// Block until the tracked count reaches zero. Returns immediately when
    /// nothing is outstanding.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count > 0 {
            self.zero.wait(&mut count);
        }
    }
}

impl Default for WaitGroup {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn wait_returns_immediately_when_empty() {
        WaitGroup::new().wait();
    }

    #[test]
    fn wait_blocks_until_all_done() {
        let wg = Arc::new(WaitGroup::new());
        wg.add(3);

        let handles: Vec<_> = (0..3u64)
            .map(|i| {
                let wg = Arc::clone(&wg);
                thread::spawn(move || {
                    thread::sleep(Duration::from_millis(10 * (i + 1)));
                    wg.done();
                })
            })
            .collect();

        wg.wait();
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
