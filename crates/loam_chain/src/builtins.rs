//! Built-in operations installed by [`Registry::with_builtins`].
//!
//! These are the toolkit's own operations: deep-path access, the small
//! pass-through helpers, and stubs. External transformation collections
//! register their functions the same way through [`Registry::register`].

use loam_path::{self as path, PathKey, PathSpec};
use loam_value::Value;

use crate::errors::{wrong_arg_type, ChainResult};
use crate::registry::Registry;

pub(crate) fn install(registry: &mut Registry) {
    registry.register("identity", |value, _| Ok(value));

    registry.register("default_to", |value, args| {
        let default = args.require("default_to", 0)?.clone();
        Ok(loam_util::default_to(value, default))
    });

    registry.register("default_to_any", |value, args| {
        Ok(loam_util::default_to_any(value, args.args().to_vec()))
    });

    registry.register("get", |value, args| {
        let spec = path_spec(args.require("get", 0)?)?;
        let default = args.arg(1).cloned().unwrap_or(Value::Null);
        Ok(path::get_or(&value, spec, default))
    });

    registry.register("has", |value, args| {
        let spec = path_spec(args.require("has", 0)?)?;
        Ok(Value::Bool(path::has(&value, spec)))
    });

    registry.register("set", |mut value, args| {
        let spec = path_spec(args.require("set", 0)?)?;
        let item = args.require("set", 1)?.clone();
        path::set(&mut value, spec, item)?;
        Ok(value)
    });

    // Flows the structure onward (with the entry removed) rather than the
    // removal flag, so deletions compose inside a chain.
    registry.register("unset", |mut value, args| {
        let spec = path_spec(args.require("unset", 0)?)?;
        path::unset(&mut value, spec);
        Ok(value)
    });

    registry.register("to_path", |value, _| {
        let tokens = path::tokenize(path_spec(&value)?);
        Ok(Value::list(
            tokens
                .keys()
                .map(|key| match key {
                    PathKey::Name(name) => Value::string(name.clone()),
                    PathKey::Index(index) => Value::Int(*index),
                })
                .collect(),
        ))
    });

    registry.register("noop", |_, _| Ok(Value::Null));
    registry.register("stub_list", |_, _| Ok(loam_util::stub_list()));
    registry.register("stub_map", |_, _| Ok(loam_util::stub_map()));
    registry.register("stub_true", |_, _| Ok(loam_util::stub_true()));
    registry.register("stub_false", |_, _| Ok(loam_util::stub_false()));
    registry.register("stub_string", |_, _| Ok(loam_util::stub_string()));
}

/// Interpret an argument value as a path spec: a string parses with the
/// grammar, an integer is a bare numeric key, a list of strings/integers
/// is a pre-split key sequence, and null is the empty path.
fn path_spec(value: &Value) -> ChainResult<PathSpec> {
    match value {
        Value::Str(s) => Ok(PathSpec::Raw(s.as_str().to_string())),
        Value::Int(n) => Ok(PathSpec::Key(*n)),
        Value::Null => Ok(PathSpec::Unset),
        Value::List(items) => {
            let mut keys = Vec::with_capacity(items.len());
            for item in items.iter() {
                match item {
                    Value::Str(s) => keys.push(PathKey::Name(s.as_str().to_string())),
                    Value::Int(n) => keys.push(PathKey::Index(*n)),
                    other => {
                        return Err(wrong_arg_type("path", "str or int", other.type_name()))
                    }
                }
            }
            Ok(PathSpec::Keys(keys))
        }
        other => Err(wrong_arg_type("path", "str, int, or list", other.type_name())),
    }
}
