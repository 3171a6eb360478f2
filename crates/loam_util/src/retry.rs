//! Retrying a fallible operation with exponential backoff.
//!
//! The schedule follows the classic shape: the first sleep is the base
//! delay; after each failure the delay is multiplied by `scale`, optionally
//! perturbed by additive jitter drawn before the cap is applied, and capped
//! at `max_delay` unless the cap is disabled (zero). Sleeps block the
//! calling thread; there is no cancellation beyond not calling again.

use std::thread;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

/// Invalid retry configuration, reported by [`RetryBuilder::build`].
#[derive(Clone, Debug, PartialEq, Error)]
pub enum RetryError {
    /// `attempts` must be at least one.
    #[error("attempts must be greater than zero")]
    ZeroAttempts,
    /// `scale` must be a finite number greater than zero.
    #[error("scale must be a finite number greater than zero, got {scale}")]
    InvalidScale {
        /// The rejected scale factor.
        scale: f64,
    },
    /// The jitter range must satisfy `low <= high`.
    #[error("jitter range is inverted: {low:?} > {high:?}")]
    InvalidJitter {
        /// Lower bound of the rejected range.
        low: Duration,
        /// Upper bound of the rejected range.
        high: Duration,
    },
}

/// Builder for [`Retry`]; validation happens in [`build`](Self::build),
/// immediately, never deferred to the first call.
#[derive(Clone, Debug)]
pub struct RetryBuilder {
    attempts: u32,
    delay: Duration,
    max_delay: Duration,
    scale: f64,
    jitter: Option<(Duration, Duration)>,
}

impl RetryBuilder {
    /// Number of attempts, including the first (default 3).
    pub fn attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Base sleep between attempts (default 500ms).
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Cap on the sleep between attempts (default 150s); zero disables the
    /// cap entirely.
    pub fn max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Multiplier applied to the delay after each failed attempt
    /// (default 2.0).
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Additive random jitter drawn uniformly from `[low, high]` before the
    /// cap is applied (default none).
    pub fn jitter(mut self, low: Duration, high: Duration) -> Self {
        self.jitter = Some((low, high));
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<Retry, RetryError> {
        if self.attempts == 0 {
            return Err(RetryError::ZeroAttempts);
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(RetryError::InvalidScale { scale: self.scale });
        }
        if let Some((low, high)) = self.jitter {
            if low > high {
                return Err(RetryError::InvalidJitter { low, high });
            }
        }
        Ok(Retry {
            attempts: self.attempts,
            delay: self.delay,
            max_delay: self.max_delay,
            scale: self.scale,
            jitter: self.jitter,
        })
    }
}

/// A validated retry policy.
///
/// ```
/// use loam_util::Retry;
/// use std::time::Duration;
///
/// let retry = Retry::builder()
///     .attempts(3)
///     .delay(Duration::ZERO)
///     .build()
///     .unwrap();
///
/// let mut calls = 0;
/// let result: Result<(), &str> = retry.call(|_attempt| {
///     calls += 1;
///     Err("still broken")
/// });
/// assert_eq!(result, Err("still broken"));
/// assert_eq!(calls, 3);
/// ```
#[derive(Clone, Debug)]
pub struct Retry {
    attempts: u32,
    delay: Duration,
    max_delay: Duration,
    scale: f64,
    jitter: Option<(Duration, Duration)>,
}

impl Default for Retry {
    fn default() -> Self {
        Retry {
            attempts: 3,
            delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(150),
            scale: 2.0,
            jitter: None,
        }
    }
}

impl Retry {
    /// Start building a policy from the defaults.
    pub fn builder() -> RetryBuilder {
        let defaults = Retry::default();
        RetryBuilder {
            attempts: defaults.attempts,
            delay: defaults.delay,
            max_delay: defaults.max_delay,
            scale: defaults.scale,
            jitter: defaults.jitter,
        }
    }

    /// Invoke `op` until it succeeds or the attempts are exhausted,
    /// returning the final error verbatim. `op` receives the 1-based
    /// attempt number.
    pub fn call<T, E>(&self, op: impl FnMut(u32) -> Result<T, E>) -> Result<T, E> {
        self.call_observed(op, |_, _| {})
    }

    /// Like [`call`](Self::call), invoking `on_error` with every caught
    /// failure and its attempt number — including the final one,
    /// immediately before the final error is returned.
    pub fn call_observed<T, E>(
        &self,
        mut op: impl FnMut(u32) -> Result<T, E>,
        mut on_error: impl FnMut(&E, u32),
    ) -> Result<T, E> {
        let mut delay_time = self.delay.as_secs_f64();
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(error) => {
                    on_error(&error, attempt);
                    if attempt >= self.attempts {
                        return Err(error);
                    }
                    if let Some((low, high)) = self.jitter {
                        delay_time += rand::rng()
                            .random_range(low.as_secs_f64()..=high.as_secs_f64());
                    }
                    if !self.max_delay.is_zero() {
                        delay_time = delay_time.min(self.max_delay.as_secs_f64());
                    }
                    if delay_time > 0.0 {
                        tracing::trace!(attempt, seconds = delay_time, "sleeping before retry");
                        thread::sleep(Duration::from_secs_f64(delay_time));
                    }
                    delay_time *= self.scale;
                }
            }
        }
    }
}
