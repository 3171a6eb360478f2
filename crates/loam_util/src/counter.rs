//! Unique id generation with an explicit counter object.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id source.
///
/// Construct one per process (or inject one per use) and share it by
/// reference; there is no hidden global counter. Ids start at `"1"` and
/// increase by one per call across all clones of the reference.
#[derive(Debug, Default)]
pub struct IdCounter {
    next: AtomicU64,
}

impl IdCounter {
    /// A counter starting at zero; the first id is `"1"`.
    pub const fn new() -> Self {
        IdCounter {
            next: AtomicU64::new(0),
        }
    }

    /// The next id.
    pub fn next_id(&self) -> String {
        self.bump().to_string()
    }

    /// The next id with `prefix` prepended.
    pub fn next_prefixed(&self, prefix: &str) -> String {
        format!("{prefix}{}", self.bump())
    }

    fn bump(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed) + 1
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn ids_are_sequential() {
        let ids = IdCounter::new();
        assert_eq!(ids.next_id(), "1");
        assert_eq!(ids.next_prefixed("id_"), "id_2");
        assert_eq!(ids.next_id(), "3");
    }

    #[test]
    fn counters_are_independent() {
        let a = IdCounter::new();
        let b = IdCounter::new();
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), "1");
    }
}
