//! loam — a data-manipulation toolkit.
//!
//! Two pieces with real machinery live here:
//!
//! - **deep paths**: string-addressed access into nested map/list
//!   structures ([`get`], [`set`], [`has`], [`unset`], [`update`]), with a
//!   small tokenizer behind the path grammar (`"a.b[0].c"`);
//! - **lazy chains**: a deferred evaluator composing named operations from
//!   a [`Registry`] over a seed value, resolved on demand by
//!   [`Chain::value`].
//!
//! Around them sit the function utilities: [`Retry`], [`memoize`],
//! [`attempt`], [`IdCounter`], the property/matcher combinators, and
//! friends.
//!
//! ```
//! use loam::{chain, Value};
//!
//! let doc = Value::map_from([("msg", Value::string("hi"))]);
//! let result = chain(doc)
//!     .invoke("get", [Value::string("msg")])?
//!     .into_value()?;
//! assert_eq!(result, Value::string("hi"));
//! # Ok::<(), loam::ChainError>(())
//! ```

use std::sync::{Arc, OnceLock};

pub use loam_chain::{
    invalid_method, tap, wrong_arg_count, wrong_arg_type, BoundOp, CallArgs, Chain, ChainError,
    ChainErrorKind, ChainResult, OpFn, Operation, Registry,
};
pub use loam_path::{
    find, get, get_or, has, set, set_with, tokenize, unset, update, update_with, ContainerKind,
    Customizer, Path, PathError, PathKey, PathSpec, PathToken,
};
pub use loam_util::{
    attempt, cond, conforms, conforms_to, constant, default_to, default_to_any, identity,
    int_range, int_range_by, int_range_right, is_match, iteratee, matches, matches_property,
    memoize, memoize_with, noop, now, over, over_every, over_some, properties, property,
    property_of, random_float, random_int, stub_false, stub_list, stub_map, stub_string,
    stub_true, times, Attempted, IdCounter, IntRange, KeyResolver, Memoized, Predicate, Retry,
    RetryBuilder, RetryError, Transform,
};
pub use loam_value::{Heap, Value};

/// The process-wide default registry, holding the built-in operations.
///
/// Built once on first use and immutable afterwards; build a
/// [`Registry`] of your own to register additional operations.
pub fn default_registry() -> &'static Arc<Registry> {
    static REGISTRY: OnceLock<Arc<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Arc::new(Registry::with_builtins()))
}

/// Start a lazy chain over `value` against the default registry.
pub fn chain(value: impl Into<Value>) -> Chain {
    default_registry().chain(value)
}
