//! Iterators over an [`IndexedList`].

use core::iter::FusedIterator;
use core::marker::PhantomData;

use crate::{IndexedList, Key, Node, Storage};

// =============================================================================
// Iter - primary sequence
// =============================================================================

/// Iterator over the primary sequence. Created by [`IndexedList::iter`].
pub struct Iter<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, S, K: Key> Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) fn new(storage: &'a S, front: K, back: K, remaining: usize) -> Self {
        Self {
            storage,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Safety: `remaining` counts the live nodes between `front` and `back`
        let node = unsafe { self.storage.get_unchecked(self.front) };
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        // Safety: `remaining` counts the live nodes between `front` and `back`
        let node = unsafe { self.storage.get_unchecked(self.back) };
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, S, K: Key + 'a> FusedIterator for Iter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<T, S, K: Key> Clone for Iter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// SortedIter - ascending or descending thread
// =============================================================================

/// Iterator over one of the sorted threads.
///
/// Created by [`IndexedList::iter_asc`] and [`IndexedList::iter_desc`].
pub struct SortedIter<'a, T, S, K: Key> {
    storage: &'a S,
    current: K,
    remaining: usize,
    descending: bool,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, S, K: Key> SortedIter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) fn ascending(storage: &'a S, head: K, len: usize) -> Self {
        Self {
            storage,
            current: head,
            remaining: len,
            descending: false,
            _marker: PhantomData,
        }
    }

    pub(crate) fn descending(storage: &'a S, head: K, len: usize) -> Self {
        Self {
            storage,
            current: head,
            remaining: len,
            descending: true,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a, S, K: Key + 'a> Iterator for SortedIter<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.current.is_none() {
            return None;
        }
        // Safety: thread links only name live nodes
        let node = unsafe { self.storage.get_unchecked(self.current) };
        self.current = if self.descending { node.desc } else { node.asc };
        self.remaining -= 1;
        Some(&node.value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Key + 'a> ExactSizeIterator for SortedIter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<'a, T: 'a, S, K: Key + 'a> FusedIterator for SortedIter<'a, T, S, K> where
    S: Storage<Node<T, K>, Key = K>
{
}

impl<T, S, K: Key> Clone for SortedIter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            current: self.current,
            remaining: self.remaining,
            descending: self.descending,
            _marker: PhantomData,
        }
    }
}

// =============================================================================
// Keys
// =============================================================================

/// Iterator over node keys in primary order. Created by
/// [`IndexedList::keys`].
pub struct Keys<'a, T, S, K: Key> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T, S, K: Key> Keys<'a, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) fn new(storage: &'a S, front: K, back: K, remaining: usize) -> Self {
        Self {
            storage,
            front,
            back,
            remaining,
            _marker: PhantomData,
        }
    }
}

impl<T, S, K: Key> Iterator for Keys<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.front;
        // Safety: `remaining` counts the live nodes between `front` and `back`
        self.front = unsafe { self.storage.get_unchecked(key) }.next;
        self.remaining -= 1;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S, K: Key> DoubleEndedIterator for Keys<'_, T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<K> {
        if self.remaining == 0 {
            return None;
        }
        let key = self.back;
        // Safety: `remaining` counts the live nodes between `front` and `back`
        self.back = unsafe { self.storage.get_unchecked(key) }.prev;
        self.remaining -= 1;
        Some(key)
    }
}

impl<T, S, K: Key> ExactSizeIterator for Keys<'_, T, S, K> where S: Storage<Node<T, K>, Key = K> {}

// =============================================================================
// IntoIter - consuming
// =============================================================================

/// Consuming iterator over the primary sequence.
pub struct IntoIter<T, S, K: Key>
where
    S: Storage<Node<T, K>, Key = K>,
{
    list: IndexedList<T, S, K>,
}

impl<T, S, K: Key> IntoIter<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) fn new(list: IndexedList<T, S, K>) -> Self {
        Self { list }
    }
}

impl<T, S, K: Key> Iterator for IntoIter<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len(), Some(self.list.len()))
    }
}

impl<T, S, K: Key> DoubleEndedIterator for IntoIter<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T, S, K: Key> ExactSizeIterator for IntoIter<T, S, K> where S: Storage<Node<T, K>, Key = K> {}

#[cfg(test)]
mod tests {
    use crate::{FixedIndexedList, IndexedList, Key, Node, Storage};

    fn three_orders<T: Copy, S, K: Key>(list: &IndexedList<T, S, K>) -> [Vec<T>; 3]
    where
        S: Storage<Node<T, K>, Key = K>,
    {
        [
            list.iter().copied().collect(),
            list.iter_asc().copied().collect(),
            list.iter_desc().copied().collect(),
        ]
    }

    #[test]
    fn walks_generic_over_key_type() {
        let slab: IndexedList<u8> = IndexedList::from([2, 7, 1]);
        let mut fixed: FixedIndexedList<u8> = FixedIndexedList::with_capacity(3);
        for v in [2, 7, 1] {
            fixed.try_push_back(v).unwrap();
        }

        let expected = [vec![2, 7, 1], vec![1, 2, 7], vec![7, 2, 1]];
        assert_eq!(three_orders(&slab), expected);
        assert_eq!(three_orders(&fixed), expected);
        assert_eq!(fixed.iter().rev().copied().collect::<Vec<_>>(), vec![1, 7, 2]);
    }

    #[test]
    fn iter_both_ends() {
        let list: IndexedList<u32> = IndexedList::from([1, 2, 3, 4]);
        let mut iter = list.iter();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_by_reference() {
        let list: IndexedList<u32> = IndexedList::from([5, 6]);
        let mut sum = 0;
        for value in &list {
            sum += value;
        }
        assert_eq!(sum, 11);
    }

    #[test]
    fn sorted_iters_report_exact_len() {
        let list: IndexedList<u32> = IndexedList::from([2, 9, 4]);

        let asc = list.iter_asc();
        assert_eq!(asc.len(), 3);
        assert_eq!(asc.clone().collect::<Vec<_>>(), vec![&2, &4, &9]);
        assert_eq!(list.iter_desc().collect::<Vec<_>>(), vec![&9, &4, &2]);
    }

    #[test]
    fn keys_follow_primary_order() {
        let mut list: IndexedList<u32> = IndexedList::new();
        let b = list.push_back(2);
        let a = list.push_front(1);
        let c = list.push_back(3);

        assert_eq!(list.keys().collect::<Vec<_>>(), vec![a, b, c]);
        assert_eq!(list.keys().rev().collect::<Vec<_>>(), vec![c, b, a]);
    }

    #[test]
    fn into_iter_drains_from_both_ends() {
        let list: IndexedList<String> = ["a", "b", "c"].into_iter().map(String::from).collect();
        let mut iter = list.into_iter();

        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next_back().as_deref(), Some("c"));
        assert_eq!(iter.collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn into_iter_drops_unconsumed() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
        struct DropCounter(u32);
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        let mut list: FixedIndexedList<DropCounter> = FixedIndexedList::with_capacity(4);
        for i in 0..4 {
            list.try_push_back(DropCounter(i)).unwrap();
        }

        let mut iter = list.into_iter();
        drop(iter.next());
        drop(iter);

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 4);
    }
}
