// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors returned to callers that misuse a `Promise` or a `Future`

use thiserror::Error;

/// Recoverable misuse of a `Promise` or `Future` handle.
///
/// Broken invariants inside a shared core are not represented here, they panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FutureError {
    #[error("Future invalid")]
    Invalid,
    #[error("Future already continued")]
    AlreadyContinued,
    #[error("Future not ready")]
    NotReady,
    #[error("Promise invalid")]
    PromiseInvalid,
    #[error("Promise already satisfied")]
    AlreadySatisfied,
    #[error("Future already retrieved")]
    AlreadyRetrieved,

    // Reserved: nothing in this crate produces the variants below yet.
    #[error("Broken promise for type name `{0}`")]
    BrokenPromise(&'static str),
    #[error("Future was cancelled")]
    Cancelled,
    #[error("Timed out")]
    Timeout,
    #[error("Predicate does not obtain")]
    PredicateDoesNotObtain,
    #[error("No timekeeper available")]
    NoTimekeeper,
    #[error("No executor provided to via")]
    NoExecutor,
}

pub type Result<T> = ::std::result::Result<T, FutureError>;
