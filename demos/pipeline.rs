// Copyright 2015 The coio Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate clap;
#[macro_use] extern crate log;
extern crate env_logger;

extern crate cofuture;

use std::thread;
use std::time::Duration;

use clap::{Arg, App};

use cofuture::{collect_all, make_promise_contract};

fn main() {
    env_logger::init();

    let matches = App::new("pipeline")
            .version(env!("CARGO_PKG_VERSION"))
            .author("Y. T. Chung <zonyitoo@gmail.com>")
            .arg(Arg::with_name("VALUE").short("v").long("value").takes_value(true)
                    .help("Value the producer resolves with"))
            .arg(Arg::with_name("DELAY").short("d").long("delay").takes_value(true)
                    .help("Milliseconds the producer sleeps before resolving"))
            .arg(Arg::with_name("WIDTH").short("w").long("width").takes_value(true)
                    .help("Number of producers in the fan-in stage"))
            .get_matches();

    let value: u64 = matches.value_of("VALUE").unwrap_or("100").parse().unwrap();
    let delay = Duration::from_millis(matches.value_of("DELAY").unwrap_or("100").parse().unwrap());
    let width: usize = matches.value_of("WIDTH").unwrap_or("4").parse().unwrap();

    // Chain three stages onto a future whose producer has not run yet.
    let (mut promise, future) = make_promise_contract::<u64>();

    let producer = thread::spawn(move || {
        thread::sleep(delay);
        info!("Producer resolving with {}", value);
        promise.set_value(value).unwrap();
    });

    let strings = future.then_value(|i| i * i)
        .and_then(|f| f.then_value(|i| i.to_string()))
        .and_then(|f| f.then_value(|s| vec![s; 4]))
        .unwrap();

    for s in strings.get().unwrap() {
        println!("{}", s);
    }

    producer.join().unwrap();

    // Fan in: one producer thread per input, summed once all are in.
    let (promises, futures): (Vec<_>, Vec<_>) =
        (0..width).map(|_| make_promise_contract::<u64>()).unzip();

    let sum = collect_all(futures)
        .and_then(|f| f.then_value(|values| values.iter().sum::<u64>()))
        .unwrap();

    let producers: Vec<_> = promises.into_iter()
        .enumerate()
        .map(|(index, mut promise)| {
            thread::spawn(move || {
                thread::sleep(delay / (index as u32 + 1));
                debug!("Producer {} resolving", index);
                promise.set_value(value + index as u64).unwrap();
            })
        })
        .collect();

    println!("sum of {} producers: {}", width, sum.get().unwrap());

    for p in producers {
        p.join().unwrap();
    }
}
