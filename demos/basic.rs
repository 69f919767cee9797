//! Feed a pool from a background thread and drain it gracefully.
//!
//! Run with `cargo run --example basic`.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use drainpool::core::Pool;
use drainpool::infra::ChannelProducer;
use drainpool::util::init_tracing;

fn main() {
    init_tracing();

    let producer = Arc::new(ChannelProducer::new(50));
    let pool = Arc::new(Pool::new(
        Arc::clone(&producer),
        |item: u64| {
            println!("processed {item}");
            thread::sleep(Duration::from_millis(110));
        },
        4,
    ));

    let feeder = {
        let producer = Arc::clone(&producer);
        thread::spawn(move || {
            for item in 0..100u64 {
                if !producer.push(item) {
                    break;
                }
                thread::sleep(Duration::from_millis(10));
            }
        })
    };

    let stopper = {
        let pool = Arc::clone(&pool);
        thread::spawn(move || {
            thread::sleep(Duration::from_secs(1));
            pool.stop().expect("pool stop");
        })
    };

    pool.start().expect("pool start");
    feeder.join().expect("feeder thread");
    stopper.join().expect("stopper thread");
}
