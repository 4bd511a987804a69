// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The state shared between one `Promise` and one `Future`
//!
//! Exactly two parties ever race on a `Core`: the producer storing the result
//! and the consumer storing the callback. Whoever comes second performs the
//! transition into `Done` and runs the callback on its own thread.
//!
//! Slot access is gated by the state tag:
//!
//! * the producer writes `value` only while the state is `Start` or
//!   `OnlyCallback`, before publishing,
//! * the consumer writes `callback` only while the state is `Start` or
//!   `OnlyResult`, before publishing,
//! * both slots are read only by the thread that moved the state into `Done`,
//!   or by the consumer while it observes `OnlyResult`.

pub mod state;

use std::cell::UnsafeCell;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use self::state::{transition, Action, Event, State};

pub type Callback<T> = Box<dyn FnOnce(T) + Send + 'static>;

pub struct Core<T> {
    value: UnsafeCell<Option<T>>,
    callback: UnsafeCell<Option<Callback<T>>>,
    state: AtomicU8,
}

unsafe impl<T: Send> Send for Core<T> {}
unsafe impl<T: Send> Sync for Core<T> {}

#[inline]
fn checked(state: State, event: Event) -> (State, Action) {
    match transition(state, event) {
        Ok(step) => step,
        Err(misuse) => panic!("{}", misuse),
    }
}

impl<T> Core<T> {
    /// A core in `Start`, waiting for both sides.
    pub fn new() -> Arc<Core<T>> {
        Arc::new(Core {
            value: UnsafeCell::new(None),
            callback: UnsafeCell::new(None),
            state: AtomicU8::new(State::Start as u8),
        })
    }

    /// A core that already holds its result.
    pub fn with_result(value: T) -> Arc<Core<T>> {
        Arc::new(Core {
            value: UnsafeCell::new(Some(value)),
            callback: UnsafeCell::new(None),
            state: AtomicU8::new(State::OnlyResult as u8),
        })
    }

    #[inline]
    pub fn state(&self) -> State {
        State::from_u8(self.state.load(Ordering::Acquire))
    }

    #[inline]
    pub fn has_result(&self) -> bool {
        self.state().has_result()
    }

    #[inline]
    pub fn has_callback(&self) -> bool {
        self.state().has_callback()
    }

    #[inline]
    pub fn ready(&self) -> bool {
        self.has_result()
    }

    /// Whether the producer side is finished with this core.
    #[inline]
    pub fn is_fulfilled(&self) -> bool {
        match self.state() {
            State::Start | State::OnlyCallback => false,
            _ => true,
        }
    }

    /// Store the result. Runs the callback inline if it is already attached.
    ///
    /// Panics if a result was stored before.
    pub fn set_result(&self, value: T) {
        let state = self.state();
        checked(state, Event::SetResult);

        unsafe {
            *self.value.get() = Some(value);
        }

        self.advance(state, Event::SetResult);
    }

    /// Store the callback. Runs it inline if the result is already there.
    ///
    /// Panics if a callback was stored before.
    pub fn set_callback<F>(&self, func: F)
        where F: FnOnce(T) + Send + 'static
    {
        let state = self.state();
        checked(state, Event::SetCallback);

        unsafe {
            *self.callback.get() = Some(Box::new(func));
        }

        self.advance(state, Event::SetCallback);
    }

    /// Move the result out without a callback, leaving the core `Empty`.
    ///
    /// Must only be called by the consumer.
    pub fn take_result(&self) -> Option<T> {
        let state = self.state();

        match transition(state, Event::TakeResult) {
            Ok((next, Action::Take)) => {
                // The producer is finished and the consumer is us, nobody else
                // touches the state from here on.
                self.state.store(next as u8, Ordering::Relaxed);
                trace!("Core {:?} -> {:?}", state, next);
                unsafe { (*self.value.get()).take() }
            }
            _ => None,
        }
    }

    /// Borrow the result while it sits in the core.
    ///
    /// Must only be called by the consumer.
    pub fn result_ref(&self) -> Option<&T> {
        match self.state() {
            State::OnlyResult => unsafe { (*self.value.get()).as_ref() },
            _ => None,
        }
    }

    /// Mutably borrow the result while it sits in the core.
    ///
    /// # Safety
    ///
    /// The caller must be the consumer and must hold the only live borrow of
    /// the result.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn result_mut(&self) -> Option<&mut T> {
        match self.state() {
            State::OnlyResult => (*self.value.get()).as_mut(),
            _ => None,
        }
    }

    /// Publish the slot written for `event`, or finish the handshake if the
    /// other side was first.
    fn advance(&self, mut state: State, event: Event) {
        if state == State::Start {
            let (next, _) = checked(state, event);

            match self.state.compare_exchange(state as u8,
                                              next as u8,
                                              Ordering::Release,
                                              Ordering::Acquire) {
                Ok(_) => {
                    trace!("Core {:?} -> {:?}", state, next);
                    return;
                }
                Err(actual) => state = State::from_u8(actual),
            }
        }

        let (next, action) = checked(state, event);
        debug_assert_eq!(action, Action::RunCallback);

        // Only this thread ever writes `Done`, and it runs the callback right after.
        self.state.store(next as u8, Ordering::Relaxed);
        trace!("Core {:?} -> {:?}", state, next);

        self.do_callback();
    }

    fn do_callback(&self) {
        let (callback, value) = unsafe { ((*self.callback.get()).take(), (*self.value.get()).take()) };

        match (callback, value) {
            (Some(callback), Some(value)) => callback(value),
            _ => panic!("Core reached Done without both a result and a callback"),
        }
    }
}

impl<T> Drop for Core<T> {
    fn drop(&mut self) {
        let state = State::from_u8(*self.state.get_mut());

        match state {
            State::OnlyResult => {
                drop(self.value.get_mut().take());
            }
            State::Done | State::Empty => {
                debug_assert!(self.value.get_mut().is_none());
                debug_assert!(self.callback.get_mut().is_none());
            }
            State::Start => {
                trace!("Core dropped before either side arrived");
            }
            State::OnlyCallback => {
                debug!("Core dropped without a result, continuation will never run");
                drop(self.callback.get_mut().take());
            }
        }
    }
}

impl<T> fmt::Debug for Core<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Core({:?})", self.state())
    }
}
