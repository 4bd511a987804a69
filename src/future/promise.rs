// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::sync::Arc;

use crate::error::{FutureError, Result};
use super::shared::Core;
use super::Future;

/// The producing half of a contract. Sets the value exactly once.
pub struct Promise<T> {
    retrieved: bool,
    core: Option<Arc<Core<T>>>,
}

impl<T> Promise<T>
    where T: Send + 'static
{
    pub fn new() -> Promise<T> {
        Promise {
            retrieved: false,
            core: Some(Core::new()),
        }
    }

    /// A promise without shared state. Every operation on it fails with
    /// `PromiseInvalid`.
    pub fn make_empty() -> Promise<T> {
        Promise {
            retrieved: false,
            core: None,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.core.is_some()
    }

    fn core(&self) -> Result<&Arc<Core<T>>> {
        self.core.as_ref().ok_or(FutureError::PromiseInvalid)
    }

    /// Hand out the consuming half. Only the first call succeeds.
    pub fn get_future(&mut self) -> Result<Future<T>> {
        let core = self.core()?.clone();

        if self.retrieved {
            return Err(FutureError::AlreadyRetrieved);
        }

        self.retrieved = true;
        Ok(Future::with_core(core))
    }

    /// Whether a value has been set. An empty promise is never fulfilled.
    pub fn is_fulfilled(&self) -> bool {
        self.core.as_ref().map_or(false, |core| core.is_fulfilled())
    }

    /// Set the value, running the attached continuation (if any) on the
    /// current thread before returning.
    pub fn set_value(&mut self, value: T) -> Result<()> {
        self.throw_if_fulfilled()?;
        self.fulfill(value);
        Ok(())
    }

    /// Set the value produced by `func`. `func` is not called if the promise
    /// cannot accept a value.
    pub fn set_with<F>(&mut self, func: F) -> Result<()>
        where F: FnOnce() -> T
    {
        self.throw_if_fulfilled()?;
        self.fulfill(func());
        Ok(())
    }

    fn throw_if_fulfilled(&self) -> Result<()> {
        if self.core()?.is_fulfilled() {
            Err(FutureError::AlreadySatisfied)
        } else {
            Ok(())
        }
    }

    /// Set the value of a promise that is known to be unfulfilled, as the
    /// relay promises created by continuations are.
    pub(crate) fn fulfill(&self, value: T) {
        match self.core {
            Some(ref core) => core.set_result(value),
            None => panic!("fulfilling an empty Promise"),
        }
    }
}

impl<T> Default for Promise<T>
    where T: Send + 'static
{
    fn default() -> Promise<T> {
        Promise::new()
    }
}

impl<T> Drop for Promise<T> {
    fn drop(&mut self) {
        if let Some(ref core) = self.core {
            if self.retrieved && !core.is_fulfilled() {
                debug!("Promise dropped without a value, its Future will never be ready");
            }
        }
    }
}

impl<T> fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.core {
            Some(ref core) => write!(f, "Promise({:?}, retrieved: {})", core, self.retrieved),
            None => write!(f, "Promise(<empty>)"),
        }
    }
}
