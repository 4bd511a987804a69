// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::Result;
use crate::future::{make_future, make_promise_contract, Future, Promise};
use super::{prepare, slots, Slot};

struct NContext<T> {
    slots: Vec<Slot<T>>,
    n: usize,
    // Decides which inputs get to store a value. Pure control, nothing is
    // published through it.
    completed: AtomicUsize,
    // Publishes the slot writes to the input that stores the n-th value.
    stored: AtomicUsize,
    promise: Promise<Vec<(usize, T)>>,
}

impl<T> NContext<T>
    where T: Send + 'static
{
    fn arrive(&self, index: usize, value: T) {
        if self.completed.fetch_add(1, Ordering::Relaxed) >= self.n {
            trace!("collect_n: input {} arrived after the first {}, dropped", index, self.n);
            return;
        }

        unsafe { self.slots[index].put(value) };

        if self.stored.fetch_add(1, Ordering::AcqRel) + 1 == self.n {
            self.complete(index);
        }
    }

    fn complete(&self, winner: usize) {
        let values: Vec<(usize, T)> = self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| unsafe { slot.take() }.map(|value| (index, value)))
            .collect();

        debug_assert_eq!(values.len(), self.n);
        debug!("collect_n: input {} completed {} of {}", winner, self.n, self.slots.len());
        self.promise.fulfill(values);
    }
}

/// A future of the first `n` inputs to complete, as `(index, value)` pairs
/// sorted by index.
///
/// Values of inputs completing after the first `n` are dropped. `n == 0`
/// yields a ready, empty vector.
///
/// # Panics
///
/// Panics if `n` exceeds the number of inputs.
pub fn collect_n<T, I>(futures: I, n: usize) -> Result<Future<Vec<(usize, T)>>>
    where T: Send + 'static,
          I: IntoIterator<Item = Future<T>>
{
    let futures = prepare(futures)?;

    assert!(n <= futures.len(),
            "collect_n: asked for {} of {} futures",
            n,
            futures.len());

    if n == 0 {
        return Ok(make_future(Vec::new()));
    }

    let (promise, future) = make_promise_contract();
    let ctx = Arc::new(NContext {
        slots: slots(futures.len()),
        n,
        completed: AtomicUsize::new(0),
        stored: AtomicUsize::new(0),
        promise,
    });

    for (index, mut input) in futures.into_iter().enumerate() {
        let ctx = ctx.clone();
        input.set_callback(move |value| ctx.arrive(index, value))?;
    }

    Ok(future)
}
