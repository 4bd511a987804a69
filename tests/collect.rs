extern crate cofuture;
extern crate env_logger;
extern crate rand;

use std::sync::{Arc, Barrier};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use rand::seq::SliceRandom;
use rand::thread_rng;

use cofuture::{collect_all, collect_any, collect_n, make_promise_contract, Future, Promise};

fn contracts<T>(count: usize) -> (Vec<Promise<T>>, Vec<Future<T>>)
    where T: Send + 'static
{
    (0..count).map(|_| make_promise_contract()).unzip()
}

/// Resolve every promise with `value(index)` from its own thread, all threads
/// released at once.
fn resolve_concurrently<T, F>(promises: Vec<Promise<T>>, value: F)
    where T: Send + 'static,
          F: Fn(usize) -> T
{
    let barrier = Arc::new(Barrier::new(promises.len()));

    let handles: Vec<_> = promises.into_iter()
        .enumerate()
        .map(|(index, mut promise)| {
            let barrier = barrier.clone();
            let value = value(index);

            thread::spawn(move || {
                barrier.wait();
                promise.set_value(value).unwrap();
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}

#[test]
fn test_collect_all_sum() {
    let _ = env_logger::try_init();

    let (promises, futures) = contracts::<i32>(10);
    let sum = collect_all(futures)
        .and_then(|f| f.then_value(|values| values.iter().sum::<i32>()))
        .unwrap();

    resolve_concurrently(promises, |index| index as i32 + 1);
    assert_eq!(sum.get(), Ok(55));
}

#[test]
fn test_collect_n_sum() {
    let _ = env_logger::try_init();

    let (promises, futures) = contracts::<i32>(10);
    let collected = collect_n(futures, 9).unwrap();

    resolve_concurrently(promises, |index| index as i32 + 1);

    let pairs = collected.get().unwrap();
    assert_eq!(pairs.len(), 9);
    assert!(pairs.iter().map(|&(_, v)| v).sum::<i32>() < 55);
    assert!(pairs.windows(2).all(|w| w[0].0 < w[1].0));
}

#[test]
fn test_collect_any_single_winner() {
    let _ = env_logger::try_init();

    for _ in 0..50 {
        let (promises, futures) = contracts::<i32>(10);
        let wins = Arc::new(AtomicUsize::new(0));

        let counter = wins.clone();
        let any = collect_any(futures)
            .and_then(|f| {
                f.then_value(move |pair| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    pair
                })
            })
            .unwrap();

        resolve_concurrently(promises, |_| 1);

        let (index, value) = any.get().unwrap();
        assert!(index < 10);
        assert_eq!(value, 1);
        assert_eq!(wins.load(Ordering::SeqCst), 1);
    }
}

#[test]
fn test_collect_all_order_under_shuffled_completion() {
    let mut rng = thread_rng();

    for round in 0..20 {
        let count = 1 + round;
        let (promises, futures) = contracts::<usize>(count);
        let all = collect_all(futures).unwrap();

        let mut order: Vec<(usize, Promise<usize>)> = promises.into_iter().enumerate().collect();
        order.shuffle(&mut rng);

        for (index, mut promise) in order {
            promise.set_value(index * index).unwrap();
        }

        let expected: Vec<usize> = (0..count).map(|i| i * i).collect();
        assert_eq!(all.get(), Ok(expected));
    }
}

#[test]
fn test_collect_n_under_shuffled_completion() {
    let mut rng = thread_rng();

    for n in 1..=8 {
        let (promises, futures) = contracts::<usize>(8);
        let collected = collect_n(futures, n).unwrap();

        let mut order: Vec<(usize, Promise<usize>)> = promises.into_iter().enumerate().collect();
        order.shuffle(&mut rng);

        let mut first: Vec<usize> = order.iter().take(n).map(|&(index, _)| index).collect();
        first.sort();

        for (index, mut promise) in order {
            promise.set_value(index + 100).unwrap();
        }

        let expected: Vec<(usize, usize)> = first.into_iter().map(|i| (i, i + 100)).collect();
        assert_eq!(collected.get(), Ok(expected));
    }
}

#[test]
fn test_collect_from_iterator_range() {
    let (mut promises, futures) = contracts::<char>(6);
    let middle = collect_all(futures.into_iter().skip(2).take(3)).unwrap();

    for (index, promise) in promises.iter_mut().enumerate() {
        promise.set_value((b'a' + index as u8) as char).unwrap();
    }

    assert_eq!(middle.get(), Ok(vec!['c', 'd', 'e']));
}
