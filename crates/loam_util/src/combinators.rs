//! Closure-building helpers over values: accessors, matchers, and the
//! small pass-through combinators.

use loam_path::{get, has, tokenize, Path, PathKey, PathSpec};
use loam_value::Value;

/// Boxed predicate over a value.
pub type Predicate = Box<dyn Fn(&Value) -> bool + Send + Sync>;

/// Boxed transformation of a value.
pub type Transform = Box<dyn Fn(&Value) -> Value + Send + Sync>;

/// Return the argument unchanged.
pub fn identity(value: Value) -> Value {
    value
}

/// A function that always returns a clone of `value`.
pub fn constant(value: Value) -> impl Fn() -> Value {
    move || value.clone()
}

/// `value` unless it is null, in which case `default`.
pub fn default_to(value: Value, default: Value) -> Value {
    if value.is_null() {
        default
    } else {
        value
    }
}

/// `value` unless it is null, in which case the first non-null default.
pub fn default_to_any(value: Value, defaults: impl IntoIterator<Item = Value>) -> Value {
    if !value.is_null() {
        return value;
    }
    for default in defaults {
        if !default.is_null() {
            return default;
        }
    }
    Value::Null
}

/// Accessor returning the value at `path` of a given structure.
pub fn property(path: impl Into<PathSpec>) -> impl Fn(&Value) -> Value {
    let path = tokenize(path);
    move |structure| get(structure, &path)
}

/// Accessor returning the values at each of `paths` as a list.
pub fn properties(
    paths: impl IntoIterator<Item = impl Into<PathSpec>>,
) -> impl Fn(&Value) -> Value {
    let paths: Vec<Path> = paths.into_iter().map(tokenize).collect();
    move |structure| Value::list(paths.iter().map(|path| get(structure, path)).collect())
}

/// The inverse of [`property`]: fix the structure, vary the path.
pub fn property_of(structure: Value) -> impl Fn(&str) -> Value {
    move |path| get(&structure, path)
}

/// Partial deep containment: every entry of `source` must be present in
/// `value` and match recursively; scalars compare by equality.
pub fn is_match(value: &Value, source: &Value) -> bool {
    match (value, source) {
        (Value::Map(entries), Value::Map(expected)) => expected
            .iter()
            .all(|(key, want)| entries.get(key).is_some_and(|have| is_match(have, want))),
        (Value::List(items), Value::List(expected)) => expected
            .iter()
            .enumerate()
            .all(|(i, want)| items.get(i).is_some_and(|have| is_match(have, want))),
        _ => value == source,
    }
}

/// Predicate comparing a structure against `source` with [`is_match`].
pub fn matches(source: Value) -> impl Fn(&Value) -> bool {
    move |value| is_match(value, &source)
}

/// Predicate comparing the value at `path` against `expected`.
pub fn matches_property(
    path: impl Into<PathSpec>,
    expected: Value,
) -> impl Fn(&Value) -> bool {
    let accessor = property(path);
    move |structure| is_match(&accessor(structure), &expected)
}

/// Spec function: every `(path, predicate)` pair must find a present value
/// that satisfies its predicate.
pub fn conforms(spec: Vec<(String, Predicate)>) -> impl Fn(&Value) -> bool {
    move |structure| conforms_to(structure, &spec)
}

/// Eager form of [`conforms`].
pub fn conforms_to(structure: &Value, spec: &[(String, Predicate)]) -> bool {
    spec.iter().all(|(path, predicate)| {
        has(structure, path.as_str()) && predicate(&get(structure, path.as_str()))
    })
}

/// First-match dispatch: run the action paired with the first passing
/// predicate, or return null when none pass.
pub fn cond(pairs: Vec<(Predicate, Transform)>) -> impl Fn(&Value) -> Value {
    move |value| {
        for (predicate, action) in &pairs {
            if predicate(value) {
                return action(value);
            }
        }
        Value::Null
    }
}

/// Invoke every transform with the argument, collecting the results.
pub fn over(transforms: Vec<Transform>) -> impl Fn(&Value) -> Value {
    move |value| Value::list(transforms.iter().map(|t| t(value)).collect())
}

/// Whether every predicate passes for the argument.
pub fn over_every(predicates: Vec<Predicate>) -> impl Fn(&Value) -> bool {
    move |value| predicates.iter().all(|p| p(value))
}

/// Whether any predicate passes for the argument.
pub fn over_some(predicates: Vec<Predicate>) -> impl Fn(&Value) -> bool {
    move |value| predicates.iter().any(|p| p(value))
}

/// Build a callback from shorthand:
///
/// - null → identity;
/// - a string or integer → property accessor (integers address like
///   unbracketed numeric keys);
/// - a one-element list → accessor for that literal key, unparsed;
/// - a two-element list → [`matches_property`] as a bool-returning callback;
/// - a map → [`matches`] as a bool-returning callback;
/// - anything else → identity.
pub fn iteratee(spec: Value) -> Transform {
    match spec {
        Value::Str(s) => {
            let accessor = property(s.to_string());
            Box::new(move |value| accessor(value))
        }
        Value::Int(n) => {
            // Mirror unbracketed numeric keys: address by the rendered key.
            let accessor = property(n.to_string());
            Box::new(move |value| accessor(value))
        }
        Value::Map(_) => {
            let predicate = matches(spec);
            Box::new(move |value| Value::Bool(predicate(value)))
        }
        Value::List(items) if items.len() == 1 => {
            let keys = literal_keys(&items);
            let accessor = property(keys);
            Box::new(move |value| accessor(value))
        }
        Value::List(items) if items.len() >= 2 => {
            let path = match &items[0] {
                Value::Int(n) => PathSpec::Key(*n),
                other => PathSpec::Raw(value_key(other)),
            };
            let predicate = matches_property(path, items[1].clone());
            Box::new(move |value| Value::Bool(predicate(value)))
        }
        _ => Box::new(|value| value.clone()),
    }
}

/// Treat list elements as literal keys, bypassing the path grammar.
fn literal_keys(items: &[Value]) -> Vec<PathKey> {
    items
        .iter()
        .map(|item| match item {
            Value::Int(n) => PathKey::Index(*n),
            other => PathKey::Name(value_key(other)),
        })
        .collect()
}

fn value_key(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}

// Stubs

/// An empty list.
pub fn stub_list() -> Value {
    Value::empty_list()
}

/// An empty map.
pub fn stub_map() -> Value {
    Value::empty_map()
}

/// `true`.
pub fn stub_true() -> Value {
    Value::Bool(true)
}

/// `false`.
pub fn stub_false() -> Value {
    Value::Bool(false)
}

/// An empty string.
pub fn stub_string() -> Value {
    Value::string("")
}

/// Ignore the argument, produce null.
pub fn noop(_value: &Value) -> Value {
    Value::Null
}
