//! Run a fallible operation and keep whichever side it produced.

/// Outcome of an [`attempt`]: either the computed value or the error the
/// operation surfaced, as an ordinary value rather than a propagating
/// failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Attempted<T, E> {
    /// The operation returned normally.
    Returned(T),
    /// The operation failed; the error travels in the success channel.
    Caught(E),
}

impl<T, E> Attempted<T, E> {
    /// Whether the operation returned normally.
    pub fn is_returned(&self) -> bool {
        matches!(self, Attempted::Returned(_))
    }

    /// Whether an error was caught.
    pub fn is_caught(&self) -> bool {
        matches!(self, Attempted::Caught(_))
    }

    /// The returned value, if any.
    pub fn returned(self) -> Option<T> {
        match self {
            Attempted::Returned(value) => Some(value),
            Attempted::Caught(_) => None,
        }
    }

    /// The caught error, if any.
    pub fn caught(self) -> Option<E> {
        match self {
            Attempted::Returned(_) => None,
            Attempted::Caught(error) => Some(error),
        }
    }

    /// The returned value, or `fallback` when an error was caught.
    pub fn returned_or(self, fallback: T) -> T {
        match self {
            Attempted::Returned(value) => value,
            Attempted::Caught(_) => fallback,
        }
    }

    /// Convert back into an ordinary `Result`.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Attempted::Returned(value) => Ok(value),
            Attempted::Caught(error) => Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Attempted<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Attempted::Returned(value),
            Err(error) => Attempted::Caught(error),
        }
    }
}

/// Execute `op` and capture either its result or its error.
///
/// ```
/// use loam_util::{attempt, Attempted};
///
/// let ok: Attempted<i64, String> = attempt(|| Ok(2));
/// assert_eq!(ok, Attempted::Returned(2));
///
/// let bad: Attempted<i64, String> = attempt(|| Err("nope".to_string()));
/// assert!(bad.is_caught());
/// ```
pub fn attempt<T, E>(op: impl FnOnce() -> Result<T, E>) -> Attempted<T, E> {
    op().into()
}
