//! Arc-backed heap wrapper for composite values.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Shared heap allocation for composite values.
///
/// `Heap::new` is crate-private, so external code cannot build heap variants
/// of [`Value`](crate::Value) directly and must go through the factory
/// methods instead. Cloning shares the allocation; [`Heap::make_mut`] gives
/// clone-on-write access for in-place structure edits.
pub struct Heap<T>(Arc<T>);

impl<T> Heap<T> {
    /// Allocate a new shared value.
    pub(crate) fn new(value: T) -> Self {
        Heap(Arc::new(value))
    }

    /// Whether two handles share the same allocation.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl<T: Clone> Heap<T> {
    /// Mutable access to the contents, cloning the allocation first if it
    /// is shared with other handles.
    pub fn make_mut(&mut self) -> &mut T {
        Arc::make_mut(&mut self.0)
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Heap(Arc::clone(&self.0))
    }
}

impl<T> Deref for Heap<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: PartialEq> PartialEq for Heap<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || *self.0 == *other.0
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
