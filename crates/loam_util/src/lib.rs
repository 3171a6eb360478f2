//! Function utilities for the loam toolkit.
//!
//! This crate provides:
//! - [`attempt`] and the [`Attempted`] union for capturing failures as
//!   values;
//! - [`Retry`], a validated backoff policy with an error observer;
//! - [`memoize`] / [`memoize_with`], a process-lifetime result cache;
//! - [`IdCounter`], an explicit unique-id source;
//! - repetition helpers ([`times`], [`int_range`]) and the value
//!   combinators (property accessors, matchers, stubs).

mod attempt;
mod combinators;
mod counter;
mod iterate;
mod memo;
mod retry;

use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

pub use attempt::{attempt, Attempted};
pub use combinators::{
    cond, conforms, conforms_to, constant, default_to, default_to_any, identity, is_match,
    iteratee, matches, matches_property, noop, over, over_every, over_some, properties, property,
    property_of, stub_false, stub_list, stub_map, stub_string, stub_true, Predicate, Transform,
};
pub use counter::IdCounter;
pub use iterate::{int_range, int_range_by, int_range_right, times, IntRange};
pub use memo::{memoize, memoize_with, KeyResolver, Memoized};
pub use retry::{Retry, RetryBuilder, RetryError};

/// Milliseconds elapsed since the Unix epoch.
pub fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// A random integer in `[start, stop]`, swapping inverted bounds.
pub fn random_int(start: i64, stop: i64) -> i64 {
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    rand::rng().random_range(low..=high)
}

/// A random float in `[start, stop]`, swapping inverted bounds.
pub fn random_float(start: f64, stop: f64) -> f64 {
    let (low, high) = if stop < start { (stop, start) } else { (start, stop) };
    rand::rng().random_range(low..=high)
}
