use std::fmt;
use std::sync::Arc;

use crate::error::{FutureError, Result};
use crate::sync::semaphore::OneShot;
use super::shared::Core;
use super::make_promise_contract;

/// The consuming half of a contract. Continued at most once.
pub struct Future<T> {
    core: Option<Arc<Core<T>>>,
}

impl<T> Future<T>
    where T: Send + 'static
{
    pub(crate) fn with_core(core: Arc<Core<T>>) -> Future<T> {
        Future { core: Some(core) }
    }

    /// A future without shared state. Every operation on it fails with `Invalid`.
    pub fn make_empty() -> Future<T> {
        Future { core: None }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.core.is_some()
    }

    fn core(&self) -> Result<&Arc<Core<T>>> {
        self.core.as_ref().ok_or(FutureError::Invalid)
    }

    /// The core, if a continuation may still be attached to it.
    pub(crate) fn continuable(&self) -> Result<&Arc<Core<T>>> {
        let core = self.core()?;

        if core.has_callback() {
            Err(FutureError::AlreadyContinued)
        } else {
            Ok(core)
        }
    }

    /// Whether the value has arrived. An empty future is never ready.
    pub fn is_ready(&self) -> bool {
        self.core.as_ref().map_or(false, |core| core.ready())
    }

    /// Take the value if it is there, without blocking.
    ///
    /// On success the future is left empty.
    pub fn poll(&mut self) -> Result<Option<T>> {
        let taken = self.continuable()?.take_result();

        if taken.is_some() {
            self.core = None;
        }

        Ok(taken)
    }

    /// Borrow the value, failing with `NotReady` if it has not arrived.
    pub fn value(&self) -> Result<&T> {
        let core = self.continuable()?;

        match core.result_ref() {
            Some(value) => Ok(value),
            None => Err(FutureError::NotReady),
        }
    }

    pub fn value_mut(&mut self) -> Result<&mut T> {
        let core = self.continuable()?;

        // `&mut self` makes this the only borrow of the value.
        match unsafe { core.result_mut() } {
            Some(value) => Ok(value),
            None => Err(FutureError::NotReady),
        }
    }

    /// Attach the one continuation this future will ever have.
    ///
    /// If the value is already there `func` runs right away on this thread,
    /// otherwise it runs on whichever thread sets the value.
    pub fn set_callback<F>(&mut self, func: F) -> Result<()>
        where F: FnOnce(T) + Send + 'static
    {
        self.continuable()?.set_callback(func);
        Ok(())
    }

    /// Continue with a function returning a plain value.
    pub fn then_value<U, F>(mut self, func: F) -> Result<Future<U>>
        where U: Send + 'static,
              F: FnOnce(T) -> U + Send + 'static
    {
        self.continuable()?;

        let (promise, future) = make_promise_contract::<U>();
        self.set_callback(move |value| promise.fulfill(func(value)))?;

        Ok(future)
    }

    /// Continue with a function returning another future. The returned future
    /// is ready once the inner one is.
    pub fn then<U, F>(mut self, func: F) -> Result<Future<U>>
        where U: Send + 'static,
              F: FnOnce(T) -> Future<U> + Send + 'static
    {
        self.continuable()?;

        let (promise, future) = make_promise_contract::<U>();
        self.set_callback(move |value| {
            let mut inner = func(value);

            if let Err(err) = inner.set_callback(move |value| promise.fulfill(value)) {
                panic!("continuation returned an unusable Future: {}", err);
            }
        })?;

        Ok(future)
    }

    /// Run `func` once the value is available, then pass the value on unchanged.
    pub fn ensure<F, R>(self, func: F) -> Result<Future<T>>
        where F: FnOnce() -> R + Send + 'static
    {
        self.then_value(move |value| {
            let _ = func();
            value
        })
    }

    /// Block the current thread until the value is available.
    ///
    /// Returns at once if it already is. Otherwise `self` is replaced by a
    /// relay future which is ready when this returns.
    pub fn wait(&mut self) -> Result<&mut Future<T>> {
        if self.continuable()?.ready() {
            return Ok(self);
        }

        let (promise, relay) = make_promise_contract::<T>();
        let semaphore = Arc::new(OneShot::new());
        let notifier = semaphore.clone();

        self.set_callback(move |value| {
            promise.fulfill(value);
            notifier.notify();
        })?;
        *self = relay;

        trace!("Future waiting for its value");
        semaphore.wait();

        debug_assert!(self.is_ready());
        Ok(self)
    }

    /// Block until the value is available and take it.
    pub fn get(mut self) -> Result<T> {
        self.wait()?;
        self.poll()?.ok_or(FutureError::NotReady)
    }
}

impl<T> Future<Future<T>>
    where T: Send + 'static
{
    /// Flatten one level of nesting.
    pub fn unwrap(self) -> Result<Future<T>> {
        self.then(|inner| inner)
    }
}

impl<T> fmt::Debug for Future<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.core {
            Some(ref core) => write!(f, "Future({:?})", core),
            None => write!(f, "Future(<empty>)"),
        }
    }
}
