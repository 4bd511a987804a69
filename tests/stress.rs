extern crate cofuture;
extern crate env_logger;
extern crate num_cpus;
extern crate rand;

use std::sync::{Arc, Barrier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rand::Rng;

use cofuture::{collect_all, collect_any, make_promise_contract};

const ROUNDS: usize = 2_000;

fn workers() -> usize {
    num_cpus::get().max(2).min(16)
}

/// Producer and consumer released at the same time, over and over.
#[test]
fn test_set_value_races_set_callback() {
    let _ = env_logger::try_init();

    let runs = Arc::new(AtomicUsize::new(0));
    let sum = Arc::new(AtomicUsize::new(0));

    for round in 0..ROUNDS {
        let (mut promise, mut future) = make_promise_contract::<usize>();
        let barrier = Arc::new(Barrier::new(2));

        let producer = {
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                promise.set_value(round).unwrap();
            })
        };

        let consumer = {
            let runs = runs.clone();
            let sum = sum.clone();
            thread::spawn(move || {
                barrier.wait();
                future.set_callback(move |value| {
                        runs.fetch_add(1, Ordering::SeqCst);
                        sum.fetch_add(value, Ordering::SeqCst);
                    })
                    .unwrap();
            })
        };

        producer.join().unwrap();
        consumer.join().unwrap();
    }

    assert_eq!(runs.load(Ordering::SeqCst), ROUNDS);
    assert_eq!(sum.load(Ordering::SeqCst), (0..ROUNDS).sum::<usize>());
}

/// A blocking waiter racing a producer sees the value every time.
#[test]
fn test_wait_races_set_value() {
    let _ = env_logger::try_init();
    let mut rng = rand::thread_rng();

    for round in 0..ROUNDS / 4 {
        let (mut promise, future) = make_promise_contract::<String>();
        let spin = rng.gen_range(0..200);

        let producer = thread::spawn(move || {
            for _ in 0..spin {
                thread::yield_now();
            }
            promise.set_value(round.to_string()).unwrap();
        });

        assert_eq!(future.get(), Ok(round.to_string()));
        producer.join().unwrap();
    }
}

#[test]
fn test_collect_all_many_threads() {
    let _ = env_logger::try_init();

    let inputs = workers() * 8;

    for _ in 0..50 {
        let (promises, futures): (Vec<_>, Vec<_>) =
            (0..inputs).map(|_| make_promise_contract::<usize>()).unzip();
        let all = collect_all(futures).unwrap();

        let barrier = Arc::new(Barrier::new(inputs));
        let handles: Vec<_> = promises.into_iter()
            .enumerate()
            .map(|(index, mut promise)| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    promise.set_value(index).unwrap();
                })
            })
            .collect();

        assert_eq!(all.get(), Ok((0..inputs).collect::<Vec<_>>()));

        for h in handles {
            h.join().unwrap();
        }
    }
}

#[test]
fn test_collect_any_fulfilled_once_under_contention() {
    let _ = env_logger::try_init();

    let inputs = workers() * 4;

    for _ in 0..100 {
        let (promises, futures): (Vec<_>, Vec<_>) =
            (0..inputs).map(|_| make_promise_contract::<usize>()).unzip();
        let winners = Arc::new(AtomicUsize::new(0));

        let counter = winners.clone();
        let mut any = collect_any(futures).unwrap();
        any.set_callback(move |(index, value)| {
                assert_eq!(index, value);
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        let barrier = Arc::new(Barrier::new(inputs));
        let handles: Vec<_> = promises.into_iter()
            .enumerate()
            .map(|(index, mut promise)| {
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    promise.set_value(index).unwrap();
                })
            })
            .collect();

        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(winners.load(Ordering::SeqCst), 1);
    }
}
