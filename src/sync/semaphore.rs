// The MIT License (MIT)

// Copyright (c) 2015 Y. T. Chung <zonyitoo@gmail.com>

//  Permission is hereby granted, free of charge, to any person obtaining a
//  copy of this software and associated documentation files (the "Software"),
//  to deal in the Software without restriction, including without limitation
//  the rights to use, copy, modify, merge, publish, distribute, sublicense,
//  and/or sell copies of the Software, and to permit persons to whom the
//  Software is furnished to do so, subject to the following conditions:
//
//  The above copyright notice and this permission notice shall be included in
//  all copies or substantial portions of the Software.
//
//  THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
//  OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//  FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//  AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//  LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING
//  FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
//  DEALINGS IN THE SOFTWARE.

//! One-shot semaphore for blocking threads

use std::fmt;
use std::mem;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Empty,
    Waiting,
    Ready,
}

/// Releases a single waiting thread exactly once.
///
/// `notify()` may happen before or after `wait()`; either way `wait()` returns
/// once a notification was posted. Further notifications are no-ops.
pub struct OneShot {
    lock: Mutex<State>,
    cond: Condvar,
}

impl OneShot {
    pub fn new() -> OneShot {
        OneShot {
            lock: Mutex::new(State::Empty),
            cond: Condvar::new(),
        }
    }

    // Nothing runs user code while holding the lock, a poisoned lock still
    // guards a valid `State`.
    fn guard(&self) -> MutexGuard<State> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block the current thread until `notify()` was called.
    pub fn wait(&self) {
        let mut guard = self.guard();

        loop {
            match *guard {
                State::Ready => return,
                State::Empty | State::Waiting => {
                    *guard = State::Waiting;
                    guard = self.cond.wait(guard).unwrap_or_else(PoisonError::into_inner);
                }
            }
        }
    }

    /// Post the notification, waking the waiter if there is one.
    pub fn notify(&self) {
        let mut guard = self.guard();

        match mem::replace(&mut *guard, State::Ready) {
            State::Waiting => self.cond.notify_one(),
            State::Empty | State::Ready => {}
        }
    }

    /// Whether `notify()` has been called.
    pub fn is_notified(&self) -> bool {
        *self.guard() == State::Ready
    }
}

impl Default for OneShot {
    fn default() -> OneShot {
        OneShot::new()
    }
}

impl fmt::Debug for OneShot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "OneShot({:?})", *self.guard())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_notify_before_wait() {
        let sema = OneShot::new();
        sema.notify();
        sema.notify();
        assert!(sema.is_notified());
        sema.wait();
        sema.wait();
    }

    #[test]
    fn test_wait_before_notify() {
        let sema = Arc::new(OneShot::new());
        let state = Arc::new(AtomicUsize::new(0));

        let h = {
            let sema = sema.clone();
            let state = state.clone();

            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                state.store(1, Ordering::SeqCst);
                sema.notify();
            })
        };

        assert!(!sema.is_notified());
        sema.wait();
        assert_eq!(state.load(Ordering::SeqCst), 1);

        h.join().unwrap();
    }

    #[test]
    fn test_many_rounds() {
        for _ in 0..200 {
            let sema = Arc::new(OneShot::new());

            let h = {
                let sema = sema.clone();
                thread::spawn(move || sema.notify())
            };

            sema.wait();
            h.join().unwrap();
        }
    }
}
