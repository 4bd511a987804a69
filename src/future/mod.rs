// Most of this module names type parameters the same way:
//
// T => the value carried by the current Core/Promise/Future
// U => the value of the next stage, produced by the continuation passed
//      to `.then()` or `.then_value()`
//
// Every stage owns exactly one `Core`. A `Future` returned by `.then()` is
// fed by a callback installed on the previous stage's `Core`.

pub mod shared;

mod future;
mod promise;

pub use self::future::*;
pub use self::promise::*;

use self::shared::Core;

/// Create a connected `Promise`/`Future` pair.
///
/// The future has already been retrieved from the returned promise.
pub fn make_promise_contract<T>() -> (Promise<T>, Future<T>)
    where T: Send + 'static
{
    let mut promise = Promise::new();

    match promise.get_future() {
        Ok(future) => (promise, future),
        Err(err) => unreachable!("fresh Promise refused its Future: {}", err),
    }
}

/// A future that is ready from the start.
pub fn make_future<T>(value: T) -> Future<T>
    where T: Send + 'static
{
    Future::with_core(Core::with_result(value))
}
