//! List node layout.

use crate::Key;

/// A value threaded into all three orders of an [`IndexedList`](crate::IndexedList).
///
/// `next`/`prev` form the primary sequence. `asc` and `desc` are forward
/// links into the ascending and descending threads. All four are plain
/// storage keys; the node is owned by the storage slot it lives in.
#[derive(Debug, Clone)]
pub struct Node<T, K: Key = usize> {
    pub(crate) value: T,
    pub(crate) next: K,
    pub(crate) prev: K,
    pub(crate) asc: K,
    pub(crate) desc: K,
}

impl<T, K: Key> Node<T, K> {
    /// Creates an unlinked node.
    #[inline]
    pub fn new(value: T) -> Self {
        Self {
            value,
            next: K::NONE,
            prev: K::NONE,
            asc: K::NONE,
            desc: K::NONE,
        }
    }

    /// Returns the stored value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns the key of the next node in the primary sequence.
    #[inline]
    pub fn next(&self) -> Option<K> {
        self.next.get()
    }

    /// Points the primary `next` link at `next`.
    ///
    /// Only meaningful before the node is adopted with
    /// [`IndexedList::from_chain`](crate::IndexedList::from_chain); a list
    /// never reads links set this way on nodes it already owns.
    #[inline]
    pub fn set_next(&mut self, next: K) {
        self.next = next;
    }

    /// Consumes the node, returning its value.
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}
