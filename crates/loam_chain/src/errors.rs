//! Error types for registry operations and chain evaluation.
//!
//! `ChainErrorKind` provides typed categories for programmatic matching;
//! the factory functions (e.g. [`invalid_method`]) are the public
//! construction API and populate both `kind` and `message`.

use std::fmt;

use loam_path::PathError;

/// Result of invoking a registry operation or finalizing a chain.
pub type ChainResult<T> = Result<T, ChainError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainErrorKind {
    /// A chain accessed a name the registry does not know.
    InvalidMethod {
        /// The unresolved operation name.
        name: String,
    },
    /// An operation received the wrong number of positional arguments.
    WrongArgCount {
        /// Operation reporting the mismatch.
        operation: String,
        /// Minimum number of arguments expected.
        expected: usize,
        /// Number of arguments received.
        got: usize,
    },
    /// An operation received an argument of the wrong type.
    WrongArgType {
        /// Operation reporting the mismatch.
        operation: String,
        /// Description of the accepted types.
        expected: String,
        /// Type name of the rejected argument.
        got: String,
    },
    /// A path write failed validation.
    Path(PathError),
    /// Catch-all for errors raised inside user operations.
    Custom {
        /// The error message.
        message: String,
    },
}

impl fmt::Display for ChainErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidMethod { name } => write!(f, "invalid method: {name}"),
            Self::WrongArgCount {
                operation,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 { "argument" } else { "arguments" };
                write!(f, "{operation} expects {expected} {arg_word}, got {got}")
            }
            Self::WrongArgType {
                operation,
                expected,
                got,
            } => write!(f, "{operation} expects {expected}, got {got}"),
            Self::Path(error) => write!(f, "{error}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Error raised while building or finalizing a chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainError {
    /// Structured category for programmatic matching.
    pub kind: ChainErrorKind,
    /// Human-readable message; equals `kind.to_string()` for
    /// factory-created errors.
    pub message: String,
}

impl ChainError {
    /// Create an error with just a message, using the `Custom` kind.
    ///
    /// Prefer the factory functions when a structured kind fits.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        ChainError {
            kind: ChainErrorKind::Custom {
                message: message.clone(),
            },
            message,
        }
    }

    fn from_kind(kind: ChainErrorKind) -> Self {
        let message = kind.to_string();
        ChainError { kind, message }
    }

    /// Whether this error is an unresolved-name failure.
    pub fn is_invalid_method(&self) -> bool {
        matches!(self.kind, ChainErrorKind::InvalidMethod { .. })
    }
}

impl fmt::Display for ChainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ChainError {}

impl From<PathError> for ChainError {
    fn from(error: PathError) -> Self {
        ChainError::from_kind(ChainErrorKind::Path(error))
    }
}

// Factory functions

/// Unknown or non-callable name referenced during chain access.
#[cold]
pub fn invalid_method(name: &str) -> ChainError {
    ChainError::from_kind(ChainErrorKind::InvalidMethod {
        name: name.to_string(),
    })
}

/// Too few positional arguments for an operation.
#[cold]
pub fn wrong_arg_count(operation: &str, expected: usize, got: usize) -> ChainError {
    ChainError::from_kind(ChainErrorKind::WrongArgCount {
        operation: operation.to_string(),
        expected,
        got,
    })
}

/// Argument of an unacceptable type for an operation.
#[cold]
pub fn wrong_arg_type(operation: &str, expected: &str, got: &str) -> ChainError {
    ChainError::from_kind(ChainErrorKind::WrongArgType {
        operation: operation.to_string(),
        expected: expected.to_string(),
        got: got.to_string(),
    })
}
