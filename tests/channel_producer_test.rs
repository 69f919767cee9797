//! Integration tests for the channel-backed producer under concurrent
//! feeders and the two termination paths.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use drainpool::core::{Producer, Signal};
use drainpool::infra::ChannelProducer;

#[test]
fn bounded_buffer_applies_backpressure_to_feeders() {
    let producer = Arc::new(ChannelProducer::new(2));
    let accepted = Arc::new(AtomicUsize::new(0));

    let feeder = {
        let producer = Arc::clone(&producer);
        let accepted = Arc::clone(&accepted);
        thread::spawn(move || {
            for item in 0..6u32 {
                if producer.push(item) {
                    accepted.fetch_add(1, Ordering::SeqCst);
                }
            }
        })
    };

    // Capacity 2: the feeder cannot run ahead of consumption.
    thread::sleep(Duration::from_millis(20));
    assert!(accepted.load(Ordering::SeqCst) <= 3);

    for expected in 0..6u32 {
        assert_eq!(producer.produce(), Signal::Payload(expected));
    }
    feeder.join().unwrap();
    assert_eq!(accepted.load(Ordering::SeqCst), 6);
}

#[test]
fn concurrent_stop_is_safe() {
    let producer = Arc::new(ChannelProducer::<u32>::new(8));
    producer.push(1);

    let stoppers: Vec<_> = (0..4)
        .map(|_| {
            let producer = Arc::clone(&producer);
            thread::spawn(move || producer.stop())
        })
        .collect();
    for handle in stoppers {
        handle.join().unwrap();
    }

    assert!(producer.is_closed());
    assert_eq!(producer.produce(), Signal::Payload(1));
    assert_eq!(producer.produce(), Signal::EndOfStream);
}

#[test]
fn cancel_unblocks_a_waiting_produce_call() {
    let producer = Arc::new(ChannelProducer::<u32>::new(4));

    let reader = {
        let producer = Arc::clone(&producer);
        thread::spawn(move || producer.produce())
    };
    thread::sleep(Duration::from_millis(20));
    producer.cancel();

    assert_eq!(reader.join().unwrap(), Signal::EndOfStream);
}

#[test]
fn shutdown_signal_disconnects_on_cancel() {
    let producer = ChannelProducer::<u32>::new(4);
    let signal = producer.shutdown_signal();
    assert!(matches!(
        signal.try_recv(),
        Err(crossbeam_channel::TryRecvError::Empty)
    ));

    producer.cancel();
    assert!(matches!(
        signal.try_recv(),
        Err(crossbeam_channel::TryRecvError::Disconnected)
    ));
}

#[test]
fn stop_keeps_buffered_items_cancel_does_not() {
    let stopped = ChannelProducer::new(8);
    stopped.push(1u32);
    stopped.push(2);
    stopped.stop();
    assert_eq!(stopped.buffered(), 2);

    let cancelled = ChannelProducer::new(8);
    cancelled.push(1u32);
    cancelled.push(2);
    cancelled.cancel();
    assert_eq!(cancelled.buffered(), 0);
}
