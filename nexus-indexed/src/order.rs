//! Ascending and descending thread maintenance.
//!
//! Both threads are singly linked, so inserting a node or unlinking one is a
//! scan from the thread head for the predecessor. Ties are stable: a node
//! enters a thread after every node with an equal value.

use crate::{IndexedList, Key, Node, Storage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Thread {
    Ascending,
    Descending,
}

impl Thread {
    /// Whether a node holding `value` belongs after one holding `before`.
    #[inline]
    fn goes_after<T: Ord>(self, before: &T, value: &T) -> bool {
        match self {
            Thread::Ascending => before <= value,
            Thread::Descending => before >= value,
        }
    }
}

// =============================================================================
// Thread link access
// =============================================================================

impl<T, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn thread_head(&self, thread: Thread) -> K {
        match thread {
            Thread::Ascending => self.head_asc,
            Thread::Descending => self.head_desc,
        }
    }

    #[inline]
    fn set_thread_head(&mut self, thread: Thread, key: K) {
        match thread {
            Thread::Ascending => self.head_asc = key,
            Thread::Descending => self.head_desc = key,
        }
    }

    #[inline]
    fn thread_next(&self, key: K, thread: Thread) -> K {
        let node = self.node(key);
        match thread {
            Thread::Ascending => node.asc,
            Thread::Descending => node.desc,
        }
    }

    #[inline]
    fn set_thread_next(&mut self, key: K, thread: Thread, next: K) {
        let node = self.node_mut(key);
        match thread {
            Thread::Ascending => node.asc = next,
            Thread::Descending => node.desc = next,
        }
    }

    /// Unlinks `key` from both threads and clears its thread links.
    ///
    /// The primary sequence and `len` are left alone.
    pub(crate) fn remove_sorted_node(&mut self, key: K) {
        self.thread_remove(key, Thread::Ascending);
        self.thread_remove(key, Thread::Descending);
    }

    fn thread_remove(&mut self, key: K, thread: Thread) {
        let next = self.thread_next(key, thread);
        let head = self.thread_head(thread);

        if head == key {
            self.set_thread_head(thread, next);
        } else {
            let mut cursor = head;
            while cursor.is_some() {
                let after = self.thread_next(cursor, thread);
                if after == key {
                    self.set_thread_next(cursor, thread, next);
                    break;
                }
                cursor = after;
            }
        }

        self.set_thread_next(key, thread, K::NONE);
    }
}

// =============================================================================
// Ordered insertion and rebuilds
// =============================================================================

impl<T: Ord, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Threads an unthreaded node into both sorted orders.
    ///
    /// `key` must be live with `asc` and `desc` both `NONE`.
    pub(crate) fn put_in_order(&mut self, key: K) {
        self.thread_insert(key, Thread::Ascending);
        self.thread_insert(key, Thread::Descending);
    }

    fn thread_insert(&mut self, key: K, thread: Thread) {
        let head = self.thread_head(thread);
        if head.is_none() || !thread.goes_after(&self.node(head).value, &self.node(key).value) {
            self.set_thread_next(key, thread, head);
            self.set_thread_head(thread, key);
            return;
        }

        let mut cursor = head;
        loop {
            let next = self.thread_next(cursor, thread);
            if next.is_none() || !thread.goes_after(&self.node(next).value, &self.node(key).value) {
                self.set_thread_next(key, thread, next);
                self.set_thread_next(cursor, thread, key);
                return;
            }
            cursor = next;
        }
    }

    /// Rebuilds both threads from a primary sequence already in ascending
    /// order. O(n).
    ///
    /// The ascending thread follows `next`. The descending thread visits
    /// runs of equal values from the largest down, each run in primary
    /// order, so ties stay in the same relative order in both threads.
    pub(crate) fn thread_sorted_primary(&mut self) {
        let mut key = self.head;
        while key.is_some() {
            let node = self.node_mut(key);
            node.asc = node.next;
            key = node.next;
        }
        self.head_asc = self.head;

        let mut head_desc = K::NONE;
        let mut run = self.head;
        while run.is_some() {
            let mut last = run;
            loop {
                let next = self.node(last).next;
                if next.is_none() || self.node(next).value != self.node(run).value {
                    break;
                }
                self.node_mut(last).desc = next;
                last = next;
            }

            let after = self.node(last).next;
            self.node_mut(last).desc = head_desc;
            head_desc = run;
            run = after;
        }
        self.head_desc = head_desc;
    }

    /// Discards both threads and rebuilds them from the primary sequence.
    ///
    /// Linear when the primary sequence is ascending, quadratic otherwise.
    pub(crate) fn rethread(&mut self) {
        if self.is_primary_ascending() {
            self.thread_sorted_primary();
            return;
        }

        self.head_asc = K::NONE;
        self.head_desc = K::NONE;
        let mut key = self.head;
        while key.is_some() {
            let node = self.node_mut(key);
            node.asc = K::NONE;
            node.desc = K::NONE;
            self.put_in_order(key);
            key = self.node(key).next;
        }
    }

    fn is_primary_ascending(&self) -> bool {
        self.iter().zip(self.iter().skip(1)).all(|(a, b)| a <= b)
    }
}

#[cfg(test)]
mod tests {
    use crate::{IndexedList, Key};

    fn asc(list: &IndexedList<u32>) -> Vec<u32> {
        list.iter_asc().copied().collect()
    }

    fn desc(list: &IndexedList<u32>) -> Vec<u32> {
        list.iter_desc().copied().collect()
    }

    #[test]
    fn first_node_heads_both_threads() {
        let mut list: IndexedList<u32> = IndexedList::new();
        let key = list.push_back(4);

        assert_eq!(list.head_asc, key);
        assert_eq!(list.head_desc, key);
        list.assert_invariants();
    }

    #[test]
    fn new_extremes_become_heads() {
        let mut list: IndexedList<u32> = IndexedList::from([5]);

        let low = list.push_back(1);
        assert_eq!(list.head_asc, low);

        let high = list.push_back(9);
        assert_eq!(list.head_desc, high);

        assert_eq!(asc(&list), vec![1, 5, 9]);
        assert_eq!(desc(&list), vec![9, 5, 1]);
        list.assert_invariants();
    }

    #[test]
    fn remove_sorted_node_from_head_middle_and_tail() {
        let mut list: IndexedList<u32> = IndexedList::new();
        let keys: Vec<usize> = [3, 1, 2, 5, 4].into_iter().map(|v| list.push_back(v)).collect();

        // 1 heads the ascending thread, 5 heads the descending one
        list.remove_key(keys[1]);
        assert_eq!(asc(&list), vec![2, 3, 4, 5]);
        list.remove_key(keys[3]);
        assert_eq!(desc(&list), vec![4, 3, 2]);
        list.remove_key(keys[0]);
        assert_eq!(asc(&list), vec![2, 4]);
        assert_eq!(desc(&list), vec![4, 2]);
        list.assert_invariants();

        list.remove_key(keys[2]);
        list.remove_key(keys[4]);
        assert!(list.head_asc.is_none());
        assert!(list.head_desc.is_none());
        list.assert_invariants();
    }

    #[test]
    fn remove_sorted_node_clears_thread_links() {
        let mut list: IndexedList<u32> = IndexedList::from([1, 2, 3]);
        let key = list.key_at(1);

        list.remove_sorted_node(key);

        assert!(list.node(key).asc.is_none());
        assert!(list.node(key).desc.is_none());
        assert_eq!(asc(&list), vec![1, 3]);
        assert_eq!(desc(&list), vec![3, 1]);

        list.put_in_order(key);
        list.assert_invariants();
    }

    #[test]
    fn sorted_primary_threads_runs_in_order() {
        let mut list: IndexedList<u32> = IndexedList::new();
        let keys: Vec<usize> = [1, 2, 2, 3].into_iter().map(|v| list.push_back(v)).collect();

        list.thread_sorted_primary();

        let desc_keys: Vec<usize> = {
            let mut out = Vec::new();
            let mut key = list.head_desc;
            while key != usize::MAX {
                out.push(key);
                key = list.node(key).desc;
            }
            out
        };
        assert_eq!(desc_keys, vec![keys[3], keys[1], keys[2], keys[0]]);
        assert_eq!(asc(&list), vec![1, 2, 2, 3]);
        list.assert_invariants();
    }

    #[test]
    fn rethread_rebuilds_from_unsorted_primary() {
        let mut list: IndexedList<u32> = IndexedList::from([4, 1, 3, 1]);

        list.reverse();
        list.rethread();

        assert_eq!(asc(&list), vec![1, 1, 3, 4]);
        assert_eq!(desc(&list), vec![4, 3, 1, 1]);
        list.assert_invariants();
    }

    #[test]
    fn rethread_empty_list() {
        let mut list: IndexedList<u32> = IndexedList::new();
        list.rethread();

        assert!(list.head_asc.is_none());
        assert!(list.head_desc.is_none());
        list.assert_invariants();
    }
}
