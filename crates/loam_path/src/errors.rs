//! Error types for path writes.

use thiserror::Error;

/// Validation failure raised by a write operation.
///
/// Reads never produce errors; misses are reported through return values.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PathError {
    /// A negative list index resolved before the start of the list.
    #[error("index {index} out of bounds for sequence of length {len}")]
    IndexOutOfBounds {
        /// The offending index as written.
        index: i64,
        /// Length of the list at the time of the write.
        len: usize,
    },
}
