// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Combinators turning many futures into one
//!
//! Every combinator shares one context between the callbacks of all of its
//! inputs. Inputs may complete on any thread in any order; each callback only
//! ever writes the slot of its own input.

mod all;
mod any;
mod n;

pub use self::all::collect_all;
pub use self::any::collect_any;
pub use self::n::collect_n;

use std::cell::UnsafeCell;

use crate::error::Result;
use crate::future::Future;

/// Storage for the value of a single input.
struct Slot<T>(UnsafeCell<Option<T>>);

// Each slot has a single writer, and is read only after the write was
// published through the combinator's counter.
unsafe impl<T: Send> Sync for Slot<T> {}

impl<T> Slot<T> {
    fn new() -> Slot<T> {
        Slot(UnsafeCell::new(None))
    }

    /// Must only be called by the callback owning this slot.
    unsafe fn put(&self, value: T) {
        *self.0.get() = Some(value);
    }

    /// Must only be called by the thread completing the combinator.
    unsafe fn take(&self) -> Option<T> {
        (*self.0.get()).take()
    }
}

fn slots<T>(count: usize) -> Vec<Slot<T>> {
    (0..count).map(|_| Slot::new()).collect()
}

/// Collect the inputs, failing before any callback is attached if one of
/// them cannot be continued.
fn prepare<T, I>(futures: I) -> Result<Vec<Future<T>>>
    where T: Send + 'static,
          I: IntoIterator<Item = Future<T>>
{
    let futures: Vec<Future<T>> = futures.into_iter().collect();

    for future in &futures {
        future.continuable()?;
    }

    Ok(futures)
}
