//! Terminate a pool with an in-band end-of-stream marker.
//!
//! Run with `cargo run --example eof`.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use drainpool::core::Pool;
use drainpool::infra::ChannelProducer;
use drainpool::util::init_tracing;

fn main() {
    init_tracing();

    let producer = Arc::new(ChannelProducer::new(50));

    let feeder = {
        let producer = Arc::clone(&producer);
        thread::spawn(move || {
            let started = Instant::now();
            let mut item = 0u64;
            while started.elapsed() < Duration::from_secs(1) {
                producer.push(item);
                item += 1;
                thread::sleep(Duration::from_millis(10));
            }
            producer.finish();
        })
    };

    let pool = Pool::new(
        Arc::clone(&producer),
        |item: u64| {
            println!("processed {item}");
            thread::sleep(Duration::from_millis(110));
        },
        4,
    );

    // Blocks until the marker is observed and in-flight work is done.
    pool.start().expect("pool start");
    feeder.join().expect("feeder thread");
    println!("stream drained");
}
