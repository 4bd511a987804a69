// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Explicit reference count whose last release runs the completion

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A counter armed with the number of owners of a shared context.
///
/// Each owner calls `release()` exactly once when it is finished with the
/// context. The owner whose release brings the count to zero gets `true` and
/// is responsible for completing the context; it observes every write the
/// other owners made before their release.
pub struct Countdown {
    remaining: AtomicUsize,
}

impl Countdown {
    pub fn new(count: usize) -> Countdown {
        Countdown { remaining: AtomicUsize::new(count) }
    }

    pub fn release(&self) -> bool {
        let previous = self.remaining.fetch_sub(1, Ordering::AcqRel);
        assert!(previous != 0, "Countdown released more often than it was armed");
        previous == 1
    }

    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Countdown({})", self.remaining())
    }
}
