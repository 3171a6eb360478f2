//! The lazy chain: a linearly-composed sequence of deferred calls over a
//! seed value.
//!
//! A chain's value slot is either a resolved value (`Seeded`) or exactly
//! one pending [`DeferredCall`] whose upstream is the previous chain state.
//! Chains therefore form a singly-linked list built strictly forward; no
//! sharing, no cycles. Nothing runs until [`Chain::value`] walks the list —
//! earliest call first — invoking each operation exactly once and caching
//! the result in place.
//!
//! Name resolution is eager: [`Chain::access`] consults the registry the
//! moment a name is used and fails immediately with an invalid-method
//! error, never deferring that failure to finalize time. Errors raised by
//! the operations themselves surface verbatim from [`Chain::value`]; a
//! failed finalize leaves the chain with no defined value for retry.
//!
//! A chain is a single-owner value. Construct it, extend it, and finalize
//! it from one place at a time; the borrow checker enforces what the
//! original design could only document.

use std::fmt;
use std::sync::Arc;

use loam_value::Value;

use crate::errors::{invalid_method, ChainResult};
use crate::registry::{CallArgs, Operation, Registry};

/// The chain's value slot.
enum Slot {
    /// A concrete value with no pending work.
    Seeded(Value),
    /// Exactly one deferred call, owning its upstream exclusively.
    Pending(Box<DeferredCall>),
}

/// One unresolved link: an operation, its captured arguments, and its
/// single upstream dependency.
struct DeferredCall {
    upstream: Slot,
    operation: Operation,
    args: CallArgs,
}

/// A lazily-evaluated composition of registry operations over a seed value.
pub struct Chain {
    registry: Arc<Registry>,
    slot: Slot,
}

impl Chain {
    /// Wrap `value` as a seeded chain dispatching into `registry`.
    pub fn new(registry: Arc<Registry>, value: Value) -> Self {
        Chain {
            registry,
            slot: Slot::Seeded(value),
        }
    }

    /// The registry this chain dispatches into.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Whether the chain still has deferred work.
    pub fn is_pending(&self) -> bool {
        matches!(self.slot, Slot::Pending(_))
    }

    /// Resolve `name` against the registry now.
    ///
    /// Fails synchronously with an invalid-method error when the name is
    /// unknown — at build time, not at finalize time.
    pub fn access(self, name: &str) -> ChainResult<BoundOp> {
        match self.registry.resolve(name) {
            Some(operation) => Ok(BoundOp {
                chain: self,
                operation,
            }),
            None => Err(invalid_method(name)),
        }
    }

    /// Resolve `name` and capture its arguments in one step.
    pub fn invoke(self, name: &str, args: impl Into<CallArgs>) -> ChainResult<Chain> {
        Ok(self.access(name)?.call(args))
    }

    /// Defer a side-effecting observer that passes the value through
    /// unchanged.
    pub fn tap(self, observer: impl Fn(&Value) + Send + Sync + 'static) -> Chain {
        let operation = Operation::new("tap", move |value, _| {
            observer(&value);
            Ok(value)
        });
        let registry = Arc::clone(&self.registry);
        Chain {
            registry,
            slot: Slot::Pending(Box::new(DeferredCall {
                upstream: self.slot,
                operation,
                args: CallArgs::new(),
            })),
        }
    }

    /// Resolve the chain and return its value, memoizing the result.
    ///
    /// Pending links resolve earliest-first, one operation invocation per
    /// link. Subsequent calls return the cached value without
    /// recomputation. On error the chain is left seeded with null; there
    /// are no retry semantics.
    pub fn value(&mut self) -> ChainResult<Value> {
        let slot = std::mem::replace(&mut self.slot, Slot::Seeded(Value::Null));
        let resolved = resolve_slot(slot)?;
        self.slot = Slot::Seeded(resolved.clone());
        Ok(resolved)
    }

    /// Consume the chain and return its value.
    pub fn into_value(mut self) -> ChainResult<Value> {
        self.value()
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.slot {
            Slot::Seeded(value) => f.debug_tuple("Chain::Seeded").field(value).finish(),
            Slot::Pending(call) => f
                .debug_struct("Chain::Pending")
                .field("operation", &call.operation.name())
                .finish_non_exhaustive(),
        }
    }
}

fn resolve_slot(slot: Slot) -> ChainResult<Value> {
    match slot {
        Slot::Seeded(value) => Ok(value),
        Slot::Pending(call) => {
            let DeferredCall {
                upstream,
                operation,
                args,
            } = *call;
            let input = resolve_slot(upstream)?;
            tracing::trace!(operation = operation.name(), "resolving chain link");
            operation.invoke(input, &args)
        }
    }
}

/// A registry operation bound to the chain it was accessed from, waiting
/// for its call arguments.
pub struct BoundOp {
    chain: Chain,
    operation: Operation,
}

impl std::fmt::Debug for BoundOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundOp")
            .field("operation", &self.operation.name())
            .finish()
    }
}

impl BoundOp {
    /// The resolved operation's name.
    pub fn name(&self) -> &str {
        self.operation.name()
    }

    /// Capture the call arguments, producing the next pending chain.
    ///
    /// Arguments are captured once; the upstream chain is owned by the new
    /// link and stays unresolved until finalize.
    pub fn call(self, args: impl Into<CallArgs>) -> Chain {
        let registry = Arc::clone(&self.chain.registry);
        Chain {
            registry,
            slot: Slot::Pending(Box::new(DeferredCall {
                upstream: self.chain.slot,
                operation: self.operation,
                args: args.into(),
            })),
        }
    }
}

/// Invoke `interceptor` with the value, then return the value unchanged —
/// the eager counterpart of [`Chain::tap`].
pub fn tap(value: Value, interceptor: impl FnOnce(&Value)) -> Value {
    interceptor(&value);
    value
}
