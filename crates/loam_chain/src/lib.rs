//! Function registry and lazy chain engine for the loam toolkit.
//!
//! This crate provides:
//! - [`Registry`], the lookup table from operation name to callable, and
//!   [`CallArgs`]/[`Operation`], the calling convention every registered
//!   function shares;
//! - [`Chain`]/[`BoundOp`], the deferred, linearly-composed evaluator over
//!   a seed value;
//! - [`ChainError`]/[`ChainResult`], the error surface, with factory
//!   constructors for the structured kinds;
//! - the built-in operations installed by [`Registry::with_builtins`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use loam_chain::Registry;
//! use loam_value::Value;
//!
//! let mut registry = Registry::with_builtins();
//! registry.register("add", |value, args| {
//!     let addend = args.require("add", 0)?.as_int().unwrap_or(0);
//!     Ok(Value::Int(value.as_int().unwrap_or(0) + addend))
//! });
//! let registry = Arc::new(registry);
//!
//! let result = registry
//!     .chain(3i64)
//!     .invoke("add", [Value::Int(4)])?
//!     .into_value()?;
//! assert_eq!(result, Value::Int(7));
//! # Ok::<(), loam_chain::ChainError>(())
//! ```

mod builtins;
mod chain;
mod errors;
mod registry;

pub use chain::{tap, BoundOp, Chain};
pub use errors::{
    invalid_method, wrong_arg_count, wrong_arg_type, ChainError, ChainErrorKind, ChainResult,
};
pub use registry::{CallArgs, OpFn, Operation, Registry};
