// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;

use crate::error::Result;
use crate::future::{make_future, make_promise_contract, Future, Promise};
use crate::sync::countdown::Countdown;
use super::{prepare, slots, Slot};

struct AllContext<T> {
    slots: Vec<Slot<T>>,
    countdown: Countdown,
    promise: Promise<Vec<T>>,
}

impl<T> AllContext<T>
    where T: Send + 'static
{
    /// Called once, by the input releasing the last count.
    fn complete(&self) {
        let values = self.slots
            .iter()
            .map(|slot| match unsafe { slot.take() } {
                Some(value) => value,
                None => panic!("collect_all completed with an unfilled slot"),
            })
            .collect();

        debug!("collect_all: all {} inputs arrived", self.slots.len());
        self.promise.fulfill(values);
    }
}

/// A future of every input's value, in input order.
///
/// Ready once the last input completes. An empty input yields a ready, empty
/// vector.
pub fn collect_all<T, I>(futures: I) -> Result<Future<Vec<T>>>
    where T: Send + 'static,
          I: IntoIterator<Item = Future<T>>
{
    let futures = prepare(futures)?;

    if futures.is_empty() {
        return Ok(make_future(Vec::new()));
    }

    let (promise, future) = make_promise_contract();
    let ctx = Arc::new(AllContext {
        slots: slots(futures.len()),
        countdown: Countdown::new(futures.len()),
        promise,
    });

    for (index, mut input) in futures.into_iter().enumerate() {
        let ctx = ctx.clone();

        input.set_callback(move |value| {
            unsafe { ctx.slots[index].put(value) };

            if ctx.countdown.release() {
                ctx.complete();
            }
        })?;
    }

    Ok(future)
}
