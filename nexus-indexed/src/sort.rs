//! Merge sort over the primary sequence, and merging two lists.
//!
//! The sort works on `next` links only. `prev` links and both threads are
//! rebuilt in one linear pass once the chain is in order.

use tracing::trace;

use crate::{IndexedList, Key, Node, Storage, UnboundedStorage};

impl<T: Ord, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Sorts the primary sequence in ascending order.
    ///
    /// Stable: equal values keep their relative order. Both threads are
    /// rebuilt to follow the new order. O(n log n), no allocation.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_indexed::IndexedList;
    ///
    /// let mut list: IndexedList<i32> = IndexedList::from([3, -1, 2]);
    /// list.sort();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [-1, 2, 3]);
    /// ```
    pub fn sort(&mut self) {
        if self.len < 2 {
            return;
        }

        let head = self.merge_sort(self.head);

        let mut prev = K::NONE;
        let mut key = head;
        while key.is_some() {
            let node = self.node_mut(key);
            node.prev = prev;
            prev = key;
            key = node.next;
        }
        self.head = head;
        self.tail = prev;

        self.thread_sorted_primary();
        trace!(len = self.len, "sorted list");
    }

    /// Middle node of the `next` chain starting at `start`.
    ///
    /// For an even number of nodes this is the last node of the first half.
    pub(crate) fn mid_point(&self, start: K) -> K {
        if start.is_none() {
            return start;
        }

        let mut slow = start;
        let mut fast = self.node(start).next;
        while fast.is_some() {
            fast = self.node(fast).next;
            if fast.is_none() {
                break;
            }
            slow = self.node(slow).next;
            fast = self.node(fast).next;
        }
        slow
    }

    fn merge_sort(&mut self, start: K) -> K {
        if start.is_none() || self.node(start).next.is_none() {
            return start;
        }

        let mid = self.mid_point(start);
        let right = self.node(mid).next;
        self.node_mut(mid).next = K::NONE;

        let left = self.merge_sort(start);
        let right = self.merge_sort(right);
        self.merge_runs(left, right)
    }

    /// Merges two ascending `next` chains. Ties take from `left`.
    fn merge_runs(&mut self, mut left: K, mut right: K) -> K {
        let mut head = K::NONE;
        let mut tail = K::NONE;

        while left.is_some() && right.is_some() {
            let take = if self.node(right).value < self.node(left).value {
                let key = right;
                right = self.node(right).next;
                key
            } else {
                let key = left;
                left = self.node(left).next;
                key
            };

            if tail.is_some() {
                self.node_mut(tail).next = take;
            } else {
                head = take;
            }
            tail = take;
        }

        let rest = if left.is_some() { left } else { right };
        if tail.is_some() {
            self.node_mut(tail).next = rest;
            head
        } else {
            rest
        }
    }
}

impl<T: Ord + Clone, S, K: Key> IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Returns a new list holding `a` and `b` merged in ascending order.
    ///
    /// Neither input changes. Equal values come from `a` first. Inputs that
    /// are not sorted are merged pairwise from the front, and the result's
    /// threads are still fully sorted.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_indexed::IndexedList;
    ///
    /// let a: IndexedList<u32> = IndexedList::from([1, 4, 9]);
    /// let b: IndexedList<u32> = IndexedList::from([2, 3, 10]);
    ///
    /// let merged = IndexedList::merge(&a, &b);
    /// assert_eq!(merged.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4, 9, 10]);
    /// assert_eq!(a.len(), 3);
    /// ```
    pub fn merge(a: &Self, b: &Self) -> Self {
        let mut merged = Self::with_capacity(a.len + b.len);
        let mut left = a.iter().peekable();
        let mut right = b.iter().peekable();

        loop {
            let take_right = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) => r < l,
                (Some(_), None) => false,
                (None, Some(_)) => true,
                (None, None) => break,
            };
            let next = if take_right { right.next() } else { left.next() };
            if let Some(value) = next {
                let key = merged.storage.insert(Node::new(value.clone()));
                merged.link_back(key);
            }
        }

        merged.rethread();
        trace!(len = merged.len, "merged lists");
        merged
    }
}
