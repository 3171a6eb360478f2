//! Memoizing wrapper around an arbitrary function of values.
//!
//! The cache lives for the lifetime of the wrapper and is keyed by a
//! rendered form of the arguments — by default the deterministic `Display`
//! of the argument list, or whatever a custom resolver produces. The cache
//! sits behind an `RwLock`: concurrent readers share cached results, and
//! two callers racing to compute the same key both compute but only the
//! first insert sticks.

use std::sync::RwLock;

use loam_value::Value;
use rustc_hash::FxHashMap;

/// Cache-key resolver: maps an argument list to its cache key.
pub type KeyResolver = Box<dyn Fn(&[Value]) -> String + Send + Sync>;

/// A function wrapper that caches results per rendered argument key.
pub struct Memoized<F, R = Value> {
    func: F,
    resolver: Option<KeyResolver>,
    cache: RwLock<FxHashMap<String, R>>,
}

impl<F, R> Memoized<F, R>
where
    F: Fn(&[Value]) -> R,
    R: Clone,
{
    /// Invoke the wrapped function, consulting the cache first.
    pub fn call(&self, args: &[Value]) -> R {
        let key = self.key_for(args);
        if let Ok(cache) = self.cache.read() {
            if let Some(hit) = cache.get(&key) {
                return hit.clone();
            }
        }
        let result = (self.func)(args);
        if let Ok(mut cache) = self.cache.write() {
            cache.entry(key).or_insert_with(|| result.clone());
        }
        result
    }

    /// Look up a cached result without invoking the function.
    pub fn cached(&self, args: &[Value]) -> Option<R> {
        let key = self.key_for(args);
        self.cache.read().ok()?.get(&key).cloned()
    }

    /// Number of cached entries.
    pub fn cache_len(&self) -> usize {
        self.cache.read().map(|cache| cache.len()).unwrap_or(0)
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
        }
    }

    fn key_for(&self, args: &[Value]) -> String {
        match &self.resolver {
            Some(resolver) => resolver(args),
            None => render_args(args),
        }
    }
}

/// Wrap `func` with a result cache keyed by the rendered argument list.
pub fn memoize<R, F>(func: F) -> Memoized<F, R>
where
    F: Fn(&[Value]) -> R,
    R: Clone,
{
    Memoized {
        func,
        resolver: None,
        cache: RwLock::new(FxHashMap::default()),
    }
}

/// Wrap `func` with a result cache keyed by a custom resolver.
pub fn memoize_with<R, F>(
    func: F,
    resolver: impl Fn(&[Value]) -> String + Send + Sync + 'static,
) -> Memoized<F, R>
where
    F: Fn(&[Value]) -> R,
    R: Clone,
{
    Memoized {
        func,
        resolver: Some(Box::new(resolver)),
        cache: RwLock::new(FxHashMap::default()),
    }
}

/// Default cache key: the deterministic rendering of each argument.
fn render_args(args: &[Value]) -> String {
    let mut key = String::from("(");
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            key.push_str(", ");
        }
        key.push_str(&arg.to_string());
    }
    key.push(')');
    key
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "tests panic on unexpected state")]

    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn computes_once_per_key() {
        let calls = AtomicUsize::new(0);
        let double = memoize(|args: &[Value]| {
            calls.fetch_add(1, Ordering::Relaxed);
            Value::Int(args.first().and_then(Value::as_int).unwrap_or(0) * 2)
        });

        assert_eq!(double.call(&[Value::Int(3)]), Value::Int(6));
        assert_eq!(double.call(&[Value::Int(3)]), Value::Int(6));
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        assert_eq!(double.call(&[Value::Int(4)]), Value::Int(8));
        assert_eq!(calls.load(Ordering::Relaxed), 2);
        assert_eq!(double.cache_len(), 2);
    }

    #[test]
    fn cached_peeks_without_computing() {
        let double = memoize(|args: &[Value]| {
            Value::Int(args.first().and_then(Value::as_int).unwrap_or(0) * 2)
        });
        assert_eq!(double.cached(&[Value::Int(3)]), None);
        double.call(&[Value::Int(3)]);
        assert_eq!(double.cached(&[Value::Int(3)]), Some(Value::Int(6)));
    }

    #[test]
    fn resolver_controls_the_key() {
        // Key on the first argument only; the second is ignored for caching.
        let calls = AtomicUsize::new(0);
        let first = memoize_with(
            |args: &[Value]| {
                calls.fetch_add(1, Ordering::Relaxed);
                args.first().cloned().unwrap_or(Value::Null)
            },
            |args| args.first().map(ToString::to_string).unwrap_or_default(),
        );

        assert_eq!(first.call(&[Value::Int(1), Value::Int(2)]), Value::Int(1));
        assert_eq!(first.call(&[Value::Int(1), Value::Int(9)]), Value::Int(1));
        assert_eq!(calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn distinct_shapes_do_not_collide() {
        let identity = memoize(|args: &[Value]| args.to_vec());
        assert_eq!(
            identity.call(&[Value::Int(1)]),
            vec![Value::Int(1)]
        );
        assert_eq!(
            identity.call(&[Value::string("1")]),
            vec![Value::string("1")]
        );
        assert_eq!(identity.cache_len(), 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let id = memoize(|args: &[Value]| args.to_vec());
        id.call(&[Value::Int(1)]);
        assert_eq!(id.cache_len(), 1);
        id.clear();
        assert_eq!(id.cache_len(), 0);
    }
}
