// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! States of a `Core` and the transitions between them
//!
//! The transition table is a pure function so it can be checked without any
//! atomics in the way. `Core` only decides *how* to publish a transition.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    /// Neither a result nor a callback has been stored.
    Start = 1 << 0,
    /// The producer stored a result, no callback yet.
    OnlyResult = 1 << 1,
    /// The consumer stored a callback, no result yet.
    OnlyCallback = 1 << 2,
    /// The callback consumed the result.
    Done = 1 << 3,
    /// The consumer moved the result out without ever attaching a callback.
    Empty = 1 << 4,
}

impl State {
    #[inline]
    pub fn from_u8(raw: u8) -> State {
        match raw {
            x if x == State::Start as u8 => State::Start,
            x if x == State::OnlyResult as u8 => State::OnlyResult,
            x if x == State::OnlyCallback as u8 => State::OnlyCallback,
            x if x == State::Done as u8 => State::Done,
            x if x == State::Empty as u8 => State::Empty,
            _ => panic!("corrupted future state {:#x}", raw),
        }
    }

    #[inline]
    pub fn has_result(self) -> bool {
        match self {
            State::OnlyResult | State::Done => true,
            _ => false,
        }
    }

    #[inline]
    pub fn has_callback(self) -> bool {
        match self {
            State::OnlyCallback | State::Done => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    SetResult,
    SetCallback,
    TakeResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Publish the slot that was just written and wait for the other side.
    Publish,
    /// The other side is already there: run the callback with the result.
    RunCallback,
    /// Move the result out to the consumer.
    Take,
}

/// An event that is not allowed in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misuse {
    pub state: State,
    pub event: Event,
}

impl fmt::Display for Misuse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let what = match self.event {
            Event::SetResult => "result already set",
            Event::SetCallback => "callback already set",
            Event::TakeResult => "no result to take",
        };
        write!(f, "{} (state {:?})", what, self.state)
    }
}

pub fn transition(state: State, event: Event) -> Result<(State, Action), Misuse> {
    use self::Action::*;
    use self::Event::*;
    use self::State::*;

    match (state, event) {
        (Start, SetResult) => Ok((OnlyResult, Publish)),
        (OnlyCallback, SetResult) => Ok((Done, RunCallback)),
        (Start, SetCallback) => Ok((OnlyCallback, Publish)),
        (OnlyResult, SetCallback) => Ok((Done, RunCallback)),
        (OnlyResult, TakeResult) => Ok((Empty, Take)),
        (state, event) => Err(Misuse { state, event }),
    }
}
