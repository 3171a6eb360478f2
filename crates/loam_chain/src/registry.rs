//! Lookup table from operation name to callable.
//!
//! Every registered function has the shape `f(value, args) -> value`: the
//! chained value arrives first, captured call arguments follow. The chain
//! engine consults the registry through [`Registry::resolve`] only —
//! explicit dispatch over named handles, nothing dynamic beyond the map
//! lookup.

use std::fmt;
use std::sync::Arc;

use loam_value::Value;
use rustc_hash::FxHashMap;

use crate::errors::{wrong_arg_count, ChainResult};

/// Arguments captured for one operation call: positional values plus
/// named values.
#[derive(Clone, Debug, Default)]
pub struct CallArgs {
    positional: Vec<Value>,
    named: FxHashMap<String, Value>,
}

impl CallArgs {
    /// No arguments.
    pub fn new() -> Self {
        CallArgs::default()
    }

    /// Positional arguments only.
    pub fn positional(args: Vec<Value>) -> Self {
        CallArgs {
            positional: args,
            named: FxHashMap::default(),
        }
    }

    /// Add a named argument.
    pub fn with_named(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// The positional arguments in order.
    pub fn args(&self) -> &[Value] {
        &self.positional
    }

    /// Positional argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Positional argument at `index`, or a wrong-arg-count error naming
    /// `operation`.
    pub fn require(&self, operation: &str, index: usize) -> ChainResult<&Value> {
        self.positional
            .get(index)
            .ok_or_else(|| wrong_arg_count(operation, index + 1, self.positional.len()))
    }

    /// Named argument, if present.
    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Number of positional arguments.
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Whether there are no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

impl From<Vec<Value>> for CallArgs {
    fn from(args: Vec<Value>) -> Self {
        CallArgs::positional(args)
    }
}

impl<const N: usize> From<[Value; N]> for CallArgs {
    fn from(args: [Value; N]) -> Self {
        CallArgs::positional(args.into())
    }
}

impl From<()> for CallArgs {
    fn from((): ()) -> Self {
        CallArgs::new()
    }
}

/// Signature every registered operation satisfies.
pub type OpFn = dyn Fn(Value, &CallArgs) -> ChainResult<Value> + Send + Sync;

/// A named function handle resolved from a [`Registry`].
///
/// Cheap to clone; the callable is shared.
#[derive(Clone)]
pub struct Operation {
    name: Arc<str>,
    func: Arc<OpFn>,
}

impl Operation {
    /// Wrap a callable under a name.
    pub fn new(
        name: &str,
        func: impl Fn(Value, &CallArgs) -> ChainResult<Value> + Send + Sync + 'static,
    ) -> Self {
        Operation {
            name: Arc::from(name),
            func: Arc::new(func),
        }
    }

    /// The operation's registered name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Call the operation with the chained value and captured arguments.
    pub fn invoke(&self, value: Value, args: &CallArgs) -> ChainResult<Value> {
        (self.func)(value, args)
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Registry mapping operation names to callables.
pub struct Registry {
    ops: FxHashMap<String, Operation>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Registry {
            ops: FxHashMap::default(),
        }
    }

    /// A registry pre-loaded with the toolkit's own operations.
    pub fn with_builtins() -> Self {
        let mut registry = Registry::new();
        crate::builtins::install(&mut registry);
        registry
    }

    /// Register (or replace) an operation under `name`.
    pub fn register(
        &mut self,
        name: &str,
        func: impl Fn(Value, &CallArgs) -> ChainResult<Value> + Send + Sync + 'static,
    ) {
        self.ops.insert(name.to_string(), Operation::new(name, func));
    }

    /// Look up an operation by name.
    pub fn resolve(&self, name: &str) -> Option<Operation> {
        self.ops.get(name).cloned()
    }

    /// Whether `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.ops.contains_key(name)
    }

    /// Number of registered operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ops.keys().map(String::as_str)
    }

    /// Start a chain over `value`, dispatching into this registry.
    pub fn chain(self: &Arc<Self>, value: impl Into<Value>) -> crate::Chain {
        crate::Chain::new(Arc::clone(self), value.into())
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::with_builtins()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("operations", &self.ops.len())
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.register("double", |value, _| {
            Ok(Value::Int(value.as_int().unwrap_or(0) * 2))
        });
        assert!(registry.contains("double"));
        assert_eq!(registry.len(), 1);

        let op = registry.resolve("double");
        assert!(op.is_some());
        assert!(registry.resolve("triple").is_none());
    }

    #[test]
    fn operations_invoke_with_value_first() {
        let op = Operation::new("append", |value, args| {
            let mut items = value.as_list().map(<[Value]>::to_vec).unwrap_or_default();
            items.extend(args.args().iter().cloned());
            Ok(Value::list(items))
        });
        assert_eq!(op.name(), "append");
        let out = op.invoke(
            Value::list(vec![Value::Int(1)]),
            &CallArgs::positional(vec![Value::Int(2)]),
        );
        assert_eq!(out, Ok(Value::list(vec![Value::Int(1), Value::Int(2)])));
    }

    #[test]
    fn call_args_accessors() {
        let args = CallArgs::positional(vec![Value::Int(1)]).with_named("flag", true);
        assert_eq!(args.arg(0), Some(&Value::Int(1)));
        assert_eq!(args.arg(1), None);
        assert_eq!(args.named("flag"), Some(&Value::Bool(true)));
        assert_eq!(args.named("other"), None);
        assert_eq!(args.len(), 1);
        assert!(!args.is_empty());
        assert!(CallArgs::new().is_empty());
    }

    #[test]
    fn require_reports_the_operation() {
        let args = CallArgs::new();
        let err = args.require("get", 0).unwrap_err();
        assert_eq!(err.to_string(), "get expects 1 argument, got 0");
    }

    #[test]
    fn replacing_a_name_wins() {
        let mut registry = Registry::new();
        registry.register("op", |_, _| Ok(Value::Int(1)));
        registry.register("op", |_, _| Ok(Value::Int(2)));
        let resolved = registry.resolve("op");
        let out = resolved.map(|op| op.invoke(Value::Null, &CallArgs::new()));
        assert_eq!(out, Some(Ok(Value::Int(2))));
    }
}
