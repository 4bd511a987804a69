// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;
use crate::future::{make_promise_contract, Future, Promise};
use super::prepare;

struct AnyContext<T> {
    done: AtomicBool,
    promise: Promise<(usize, T)>,
}

impl<T> AnyContext<T>
    where T: Send + 'static
{
    fn arrive(&self, index: usize, value: T) {
        // The winner hands its own value to the promise on its own thread, no
        // other input's writes need to be visible.
        if !self.done.swap(true, Ordering::Relaxed) {
            debug!("collect_any: input {} won", index);
            self.promise.fulfill((index, value));
        }
    }
}

/// A future of the first input to complete, as an `(index, value)` pair.
///
/// # Panics
///
/// Panics if there are no inputs.
pub fn collect_any<T, I>(futures: I) -> Result<Future<(usize, T)>>
    where T: Send + 'static,
          I: IntoIterator<Item = Future<T>>
{
    let futures = prepare(futures)?;
    assert!(!futures.is_empty(), "collect_any: no futures to wait for");

    let (promise, future) = make_promise_contract();
    let ctx = Arc::new(AnyContext {
        done: AtomicBool::new(false),
        promise,
    });

    for (index, mut input) in futures.into_iter().enumerate() {
        let ctx = ctx.clone();
        input.set_callback(move |value| ctx.arrive(index, value))?;
    }

    Ok(future)
}
