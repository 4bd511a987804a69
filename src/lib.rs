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

//! Lock-free promises and futures for plain threads
//!
//! A `Promise` sets a value once, its `Future` is continued once. Whichever
//! side comes second runs the continuation inline, on its own thread. There
//! is no executor: continuations must not block.
//!
//! ```
//! use cofuture::make_promise_contract;
//! use std::thread;
//!
//! let (mut promise, future) = make_promise_contract::<i32>();
//! let doubled = future.then_value(|x| x * 2).unwrap();
//!
//! let producer = thread::spawn(move || promise.set_value(21).unwrap());
//! assert_eq!(doubled.get().unwrap(), 42);
//! producer.join().unwrap();
//! ```

#[macro_use]
extern crate log;

pub use crate::collect::{collect_all, collect_any, collect_n};
pub use crate::error::FutureError;
pub use crate::future::{make_future, make_promise_contract, Future, Promise};

pub mod collect;
pub mod error;
pub mod future;
pub mod sync;
