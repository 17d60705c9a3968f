//! Insertion-ordered list with ascending and descending threads.
//!
//! Every node sits in three orders at once: the primary doubly-linked
//! sequence (the order values were inserted in), an ascending thread and a
//! descending thread. All three share one node set in one storage; the
//! threads are plain forward keys, so the list never copies a value to keep
//! them sorted.
//!
//! # Example
//!
//! ```
//! use nexus_indexed::IndexedList;
//!
//! let mut list: IndexedList<u32> = IndexedList::new();
//! list.push_back(3);
//! list.push_back(1);
//! list.push_front(2);
//!
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 3, 1]);
//! assert_eq!(list.iter_asc().copied().collect::<Vec<_>>(), [1, 2, 3]);
//! assert_eq!(list.iter_desc().copied().collect::<Vec<_>>(), [3, 2, 1]);
//! ```
//!
//! # Bounded vs Unbounded Storage
//!
//! The default storage is a growable `slab::Slab`, and pushes cannot fail.
//! With [`FixedStorage`] the list never allocates after construction and
//! pushes report [`Full`] instead:
//!
//! ```
//! use nexus_indexed::{FixedIndexedList, Full};
//!
//! let mut list: FixedIndexedList<u64> = FixedIndexedList::with_capacity(2);
//! list.try_push_back(1).unwrap();
//! list.try_push_back(2).unwrap();
//!
//! assert_eq!(list.try_push_back(3), Err(Full(3)));
//! ```
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `len`, `front`, `back`, `smallest`, `largest`, `swap`, `reverse` (per node) | O(1) |
//! | `push_*`, `pop_*`, `insert`, `erase` | O(n), thread scan |
//! | `sort` | O(n log n) |
//! | `merge` of sorted inputs | O(n) |

use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::marker::PhantomData;

use slab::Slab;
use tracing::trace;

use crate::iter::{IntoIter, Iter, Keys, SortedIter};
use crate::{Error, FixedSlab, Full, Key, Node, Storage, UnboundedStorage};

/// Growable node storage, the default for [`IndexedList`].
pub type SlabStorage<T> = Slab<Node<T, usize>>;

/// Fixed-capacity node storage with `u32` keys.
pub type FixedStorage<T> = FixedSlab<Node<T, u32>>;

/// An [`IndexedList`] over [`FixedStorage`].
pub type FixedIndexedList<T> = IndexedList<T, FixedStorage<T>, u32>;

/// A list kept in insertion order, ascending order and descending order.
///
/// The list owns its storage. Nodes are addressed by keys handed out by the
/// storage; a key stays valid until its node is removed, and removing a node
/// invalidates no other key.
///
/// # Type Parameters
///
/// - `T`: Element type. Operations that thread nodes require `T: Ord`.
/// - `S`: Storage type (default [`SlabStorage<T>`])
/// - `K`: Key type (default `usize`)
pub struct IndexedList<T, S = SlabStorage<T>, K: Key = usize>
where
    S: Storage<Node<T, K>, Key = K>,
{
    pub(crate) storage: S,
    pub(crate) head: K,
    pub(crate) tail: K,
    pub(crate) head_asc: K,
    pub(crate) head_desc: K,
    pub(crate) len: usize,
    _marker: PhantomData<T>,
}

// =============================================================================
// Base impl - any storage, no ordering required
// =============================================================================

impl<T, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Creates an empty list whose storage has room for `capacity` nodes.
    ///
    /// For bounded storage `capacity` is the hard limit.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_storage(S::with_capacity(capacity))
    }

    /// Creates an empty list over existing storage.
    ///
    /// Anything already in `storage` is dropped.
    pub fn with_storage(mut storage: S) -> Self {
        storage.clear();
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            head_asc: K::NONE,
            head_desc: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Consumes the list, returning its storage and the key of the first
    /// node.
    ///
    /// The nodes stay linked through `next`, so the pair can be handed back
    /// to [`from_chain`](Self::from_chain). The key is `K::NONE` for an
    /// empty list.
    pub fn into_chain(self) -> (S, K) {
        (self.storage, self.head)
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the backing storage.
    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the first element of the primary sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the list is empty.
    #[inline]
    pub fn front(&self) -> Result<&T, Error> {
        self.head
            .get()
            .map(|key| &self.node(key).value)
            .ok_or(Error::Empty)
    }

    /// Returns the last element of the primary sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the list is empty.
    #[inline]
    pub fn back(&self) -> Result<&T, Error> {
        self.tail
            .get()
            .map(|key| &self.node(key).value)
            .ok_or(Error::Empty)
    }

    /// Returns the smallest element, the head of the ascending thread.
    #[inline]
    pub fn smallest(&self) -> Option<&T> {
        self.head_asc.get().map(|key| &self.node(key).value)
    }

    /// Returns the largest element, the head of the descending thread.
    #[inline]
    pub fn largest(&self) -> Option<&T> {
        self.head_desc.get().map(|key| &self.node(key).value)
    }

    /// Returns the element at position `pos` of the primary sequence.
    ///
    /// O(n), walking from whichever end is nearer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos >= len()`.
    pub fn get(&self, pos: usize) -> Result<&T, Error> {
        self.check_index(pos)?;
        Ok(&self.node(self.key_at(pos)).value)
    }

    /// Returns the position of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|v| v == value)
    }

    /// Returns `true` if some element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.find(value).is_some()
    }

    // ========================================================================
    // Handles
    // ========================================================================

    /// Returns the key of the first node, or `None` if empty.
    #[inline]
    pub fn front_key(&self) -> Option<K> {
        self.head.get()
    }

    /// Returns the key of the last node, or `None` if empty.
    #[inline]
    pub fn back_key(&self) -> Option<K> {
        self.tail.get()
    }

    /// Returns the value stored under `key`.
    #[inline]
    pub fn value(&self, key: K) -> Option<&T> {
        self.storage.get(key).map(|node| &node.value)
    }

    /// Returns the key after `key` in the primary sequence.
    #[inline]
    pub fn next_key(&self, key: K) -> Option<K> {
        self.storage.get(key)?.next.get()
    }

    /// Returns the key before `key` in the primary sequence.
    #[inline]
    pub fn prev_key(&self, key: K) -> Option<K> {
        self.storage.get(key)?.prev.get()
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the list is empty.
    pub fn pop_front(&mut self) -> Result<T, Error> {
        match self.head.get() {
            Some(key) => self.detach(key).ok_or(Error::Empty),
            None => Err(Error::Empty),
        }
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the list is empty.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        match self.tail.get() {
            Some(key) => self.detach(key).ok_or(Error::Empty),
            None => Err(Error::Empty),
        }
    }

    /// Removes and returns the element at position `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos >= len()`.
    pub fn erase(&mut self, pos: usize) -> Result<T, Error> {
        self.check_index(pos)?;
        let len = self.len;
        let key = self.key_at(pos);
        self.detach(key)
            .ok_or(Error::OutOfRange { index: pos, len })
    }

    /// Removes the node under `key`, returning its value.
    ///
    /// Returns `None` if `key` names no node. Other keys stay valid.
    pub fn remove_key(&mut self, key: K) -> Option<T> {
        self.storage.get(key)?;
        self.detach(key)
    }

    /// Removes every element equal to `value`, returning how many went.
    pub fn remove(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut key = self.head;
        while key.is_some() {
            let next = self.node(key).next;
            if self.node(key).value == *value && self.detach(key).is_some() {
                removed += 1;
            }
            key = next;
        }
        removed
    }

    /// Removes consecutive duplicates, keeping the first of each run.
    ///
    /// Only adjacent elements are compared; sort first to dedup globally.
    /// Returns how many elements were removed.
    pub fn unique(&mut self) -> usize
    where
        T: PartialEq,
    {
        let mut removed = 0;
        let mut key = self.head;
        while key.is_some() {
            let next = self.node(key).next;
            if next.is_some() && self.node(next).value == self.node(key).value {
                if self.detach(next).is_some() {
                    removed += 1;
                }
            } else {
                key = next;
            }
        }
        removed
    }

    /// Shortens the list to `len` elements, dropping from the back.
    ///
    /// Does nothing if the list is already that short.
    pub fn truncate(&mut self, len: usize) {
        while self.len > len {
            let tail = self.tail;
            if self.detach(tail).is_none() {
                break;
            }
        }
    }

    /// Removes every element.
    ///
    /// Walks the primary sequence once, releasing each node's slot.
    pub fn clear(&mut self) {
        let released = self.len;
        let mut key = self.head;
        while key.is_some() {
            let next = self.node(key).next;
            self.storage.remove(key);
            key = next;
        }

        self.reset_links();
        trace!(released, "cleared list");
    }

    // ========================================================================
    // Reordering
    // ========================================================================

    /// Reverses the primary sequence in place.
    ///
    /// The ascending and descending threads are value orders and stay as
    /// they are.
    pub fn reverse(&mut self) {
        let mut key = self.head;
        while key.is_some() {
            let node = self.node_mut(key);
            core::mem::swap(&mut node.next, &mut node.prev);
            key = node.prev;
        }
        core::mem::swap(&mut self.head, &mut self.tail);
    }

    /// Exchanges the contents of two lists. O(1), no node is touched.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over the primary sequence, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter::new(&self.storage, self.head, self.tail, self.len)
    }

    /// Returns an iterator over the ascending thread.
    #[inline]
    pub fn iter_asc(&self) -> SortedIter<'_, T, S, K> {
        SortedIter::ascending(&self.storage, self.head_asc, self.len)
    }

    /// Returns an iterator over the descending thread.
    #[inline]
    pub fn iter_desc(&self) -> SortedIter<'_, T, S, K> {
        SortedIter::descending(&self.storage, self.head_desc, self.len)
    }

    /// Returns an iterator over node keys in primary order.
    #[inline]
    pub fn keys(&self) -> Keys<'_, T, S, K> {
        Keys::new(&self.storage, self.head, self.tail, self.len)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    #[inline]
    pub(crate) fn node(&self, key: K) -> &Node<T, K> {
        debug_assert!(key.is_some());
        // Safety: keys reached through this list's links name live nodes
        unsafe { self.storage.get_unchecked(key) }
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, key: K) -> &mut Node<T, K> {
        debug_assert!(key.is_some());
        // Safety: keys reached through this list's links name live nodes
        unsafe { self.storage.get_unchecked_mut(key) }
    }

    /// Forgets every node without touching storage.
    #[inline]
    fn reset_links(&mut self) {
        self.head = K::NONE;
        self.tail = K::NONE;
        self.head_asc = K::NONE;
        self.head_desc = K::NONE;
        self.len = 0;
    }

    #[inline]
    fn check_index(&self, pos: usize) -> Result<(), Error> {
        if pos >= self.len {
            return Err(Error::OutOfRange {
                index: pos,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Key of the node at `pos`. Caller guarantees `pos < len`.
    pub(crate) fn key_at(&self, pos: usize) -> K {
        if pos <= self.len / 2 {
            let mut key = self.head;
            for _ in 0..pos {
                key = self.node(key).next;
            }
            key
        } else {
            let mut key = self.tail;
            for _ in pos + 1..self.len {
                key = self.node(key).prev;
            }
            key
        }
    }

    pub(crate) fn link_back(&mut self, key: K) {
        let tail = self.tail;
        let node = self.node_mut(key);
        node.prev = tail;
        node.next = K::NONE;

        if tail.is_some() {
            self.node_mut(tail).next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    pub(crate) fn link_front(&mut self, key: K) {
        let head = self.head;
        let node = self.node_mut(key);
        node.next = head;
        node.prev = K::NONE;

        if head.is_some() {
            self.node_mut(head).prev = key;
        } else {
            self.tail = key;
        }

        self.head = key;
        self.len += 1;
    }

    pub(crate) fn link_before(&mut self, before: K, key: K) {
        let prev = self.node(before).prev;
        let node = self.node_mut(key);
        node.next = before;
        node.prev = prev;

        self.node_mut(before).prev = key;

        if prev.is_some() {
            self.node_mut(prev).next = key;
        } else {
            self.head = key;
        }

        self.len += 1;
    }

    /// Links `key` so that it ends up at position `pos` (`pos <= len`).
    pub(crate) fn link_at(&mut self, pos: usize, key: K) {
        if pos == self.len {
            self.link_back(key);
        } else {
            let before = self.key_at(pos);
            self.link_before(before, key);
        }
    }

    /// Unlinks a node from the primary sequence only.
    pub(crate) fn unlink(&mut self, key: K) {
        let node = self.node(key);
        let prev = node.prev;
        let next = node.next;

        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        let node = self.node_mut(key);
        node.prev = K::NONE;
        node.next = K::NONE;

        self.len -= 1;
    }

    /// Unlinks a node from all three orders and releases its slot.
    pub(crate) fn detach(&mut self, key: K) -> Option<T> {
        self.unlink(key);
        self.remove_sorted_node(key);
        self.storage.remove(key).map(Node::into_value)
    }
}

// =============================================================================
// Ordered impl - any storage, operations that thread new nodes
// =============================================================================

impl<T: Ord, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Adopts a chain of nodes already linked through `next` in `storage`.
    ///
    /// The chain starts at `head` (`K::NONE` for an empty chain). Only the
    /// `next` links are trusted: `prev`, the tail, the length and both
    /// threads are rebuilt from the walk.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChain`] if a link names a vacant slot, the
    /// chain loops, or some occupied slot is not on the chain. The storage
    /// is dropped in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use nexus_indexed::{IndexedList, Node};
    /// use slab::Slab;
    ///
    /// let mut storage = Slab::new();
    /// let second = storage.insert(Node::new(1));
    /// let mut first = Node::new(5);
    /// first.set_next(second);
    /// let head = storage.insert(first);
    ///
    /// let list: IndexedList<u32> = IndexedList::from_chain(storage, head).unwrap();
    /// assert_eq!(list.display().to_string(), "5 1");
    /// assert_eq!(list.display_asc().to_string(), "1 5");
    /// ```
    pub fn from_chain(storage: S, head: K) -> Result<Self, Error> {
        let mut list = Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            head_asc: K::NONE,
            head_desc: K::NONE,
            len: 0,
            _marker: PhantomData,
        };

        let occupied = list.storage.len();
        let mut prev = K::NONE;
        let mut key = head;
        let mut len = 0;
        while key.is_some() {
            if len == occupied {
                return Err(Error::InvalidChain);
            }
            let node = list.storage.get_mut(key).ok_or(Error::InvalidChain)?;
            node.prev = prev;
            node.asc = K::NONE;
            node.desc = K::NONE;
            prev = key;
            key = node.next;
            len += 1;
        }
        if len != occupied {
            return Err(Error::InvalidChain);
        }

        list.head = head;
        list.tail = prev;
        list.len = len;
        list.rethread();
        trace!(len, "adopted node chain");
        Ok(list)
    }

    /// Appends a value to the primary sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    pub fn try_push_back(&mut self, value: T) -> Result<K, Full<T>> {
        let key = self.alloc(value)?;
        self.link_back(key);
        self.put_in_order(key);
        Ok(key)
    }

    /// Prepends a value to the primary sequence.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if storage is full.
    pub fn try_push_front(&mut self, value: T) -> Result<K, Full<T>> {
        let key = self.alloc(value)?;
        self.link_front(key);
        self.put_in_order(key);
        Ok(key)
    }

    /// Inserts a value before the element at `pos`.
    ///
    /// `pos == len()` appends.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos > len()`, or [`Error::Full`]
    /// if storage is full. In both cases the list is unchanged.
    pub fn insert(&mut self, pos: usize, value: T) -> Result<K, Error> {
        if pos > self.len {
            return Err(Error::OutOfRange {
                index: pos,
                len: self.len,
            });
        }
        let key = self.alloc(value)?;
        self.link_at(pos, key);
        self.put_in_order(key);
        Ok(key)
    }

    /// Resizes the list to `new_len` elements.
    ///
    /// Shrinking drops elements from the back. Growing appends
    /// `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Full`] if storage cannot hold `new_len` elements;
    /// the list is unchanged.
    pub fn resize(&mut self, new_len: usize) -> Result<(), Error>
    where
        T: Default,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        let extra = new_len - self.len;
        if self.storage.remaining() < extra {
            return Err(Error::Full);
        }
        for _ in 0..extra {
            self.try_push_back(T::default())?;
        }
        trace!(len = self.len, extra, "grew list");
        Ok(())
    }

    /// Overwrites the first `count` elements with `value`.
    ///
    /// `count` is clamped to `len()`; the list never grows or shrinks.
    /// Overwritten nodes are moved to their new place in both threads.
    pub fn assign(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        let mut key = self.head;
        for _ in 0..count.min(self.len) {
            self.remove_sorted_node(key);
            self.node_mut(key).value = value.clone();
            self.put_in_order(key);
            key = self.node(key).next;
        }
    }

    /// Moves every element of `other` into this list before position `pos`.
    ///
    /// `pos == len()` appends. The moved elements keep their relative order
    /// and are threaded into this list's sorted orders; `other` is left
    /// empty. Values move into fresh slots of this list's storage, so keys
    /// from `other` do not carry over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `pos > len()`, or [`Error::Full`]
    /// if this list's storage cannot take every element. Neither list is
    /// changed on error, provided the storage reports `remaining()`
    /// truthfully. If an insert still fails, the elements already moved
    /// stay, the rest are dropped, and `other` is left empty.
    pub fn splice(&mut self, pos: usize, other: &mut Self) -> Result<(), Error> {
        if pos > self.len {
            return Err(Error::OutOfRange {
                index: pos,
                len: self.len,
            });
        }
        if self.storage.remaining() < other.len {
            return Err(Error::Full);
        }

        let moved = other.len;
        let anchor = if pos == self.len {
            K::NONE
        } else {
            self.key_at(pos)
        };

        // `other` forgets its chain before any slot is released, so a failed
        // move can never leave it naming vacant slots.
        let mut cursor = other.head;
        other.reset_links();

        while cursor.is_some() {
            let Some(node) = other.storage.remove(cursor) else {
                break;
            };
            cursor = node.next;

            let key = match self.alloc(node.value) {
                Ok(key) => key,
                Err(_) => {
                    other.storage.clear();
                    return Err(Error::Full);
                }
            };
            if anchor.is_some() {
                self.link_before(anchor, key);
            } else {
                self.link_back(key);
            }
            self.put_in_order(key);
        }

        trace!(moved, pos, len = self.len, "spliced list");
        Ok(())
    }

    #[inline]
    fn alloc(&mut self, value: T) -> Result<K, Full<T>> {
        self.storage
            .try_insert(Node::new(value))
            .map_err(|Full(node)| Full(node.value))
    }
}

// =============================================================================
// Unbounded storage impl - infallible insertion
// =============================================================================

impl<T, S, K: Key> IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: Ord, S, K: Key> IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    /// Appends a value, returning the new node's key.
    pub fn push_back(&mut self, value: T) -> K {
        let key = self.storage.insert(Node::new(value));
        self.link_back(key);
        self.put_in_order(key);
        key
    }

    /// Prepends a value, returning the new node's key.
    pub fn push_front(&mut self, value: T) -> K {
        let key = self.storage.insert(Node::new(value));
        self.link_front(key);
        self.put_in_order(key);
        key
    }

    /// Prepends the value built by `make`, returning the new node's key.
    pub fn emplace_front<F>(&mut self, make: F) -> K
    where
        F: FnOnce() -> T,
    {
        self.push_front(make())
    }
}

// =============================================================================
// Trait impls
// =============================================================================

impl<T, S, K: Key> Default for IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, S, K: Key> Clone for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K> + Clone,
{
    /// Deep copy: the clone gets its own storage holding copies of every
    /// node at the same keys, so both threads carry over unchanged.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            head: self.head,
            tail: self.tail,
            head_asc: self.head_asc,
            head_desc: self.head_desc,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T: fmt::Debug, S, K: Key> fmt::Debug for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq, S, K: Key> PartialEq for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S, K: Key> Eq for IndexedList<T, S, K> where S: Storage<Node<T, K>, Key = K> {}

/// Lexicographic over the primary sequence: the first differing element
/// decides, and a strict prefix orders before the longer list.
impl<T: PartialOrd, S, K: Key> PartialOrd for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord, S, K: Key> Ord for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash, S, K: Key> Hash for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len);
        for value in self.iter() {
            value.hash(state);
        }
    }
}

impl<T: Ord, S, K: Key> Extend<T> for IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T: Ord, S, K: Key> FromIterator<T> for IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut list = Self::with_capacity(iter.size_hint().0);
        list.extend(iter);
        list
    }
}

impl<T: Ord, S, K: Key, const N: usize> From<[T; N]> for IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Ord, S, K: Key> From<Vec<T>> for IndexedList<T, S, K>
where
    S: UnboundedStorage<Node<T, K>, Key = K>,
{
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T, S, K: Key> IntoIterator for &'a IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S, K: Key> IntoIterator for IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, S, K>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

// =============================================================================
// Test support
// =============================================================================

#[cfg(test)]
impl<T: Ord + fmt::Debug, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Walks every link and panics on the first broken invariant.
    pub(crate) fn assert_invariants(&self) {
        let mut primary = Vec::with_capacity(self.len);
        let mut prev = K::NONE;
        let mut key = self.head;
        while key.is_some() {
            assert_eq!(self.node(key).prev, prev, "broken prev link");
            primary.push(key.as_usize());
            assert!(primary.len() <= self.len, "primary chain longer than len");
            prev = key;
            key = self.node(key).next;
        }
        assert_eq!(self.tail, prev, "tail is not the last node");
        assert_eq!(primary.len(), self.len, "len out of sync");
        assert_eq!(self.storage.len(), self.len, "orphaned slots");

        primary.sort_unstable();
        for descending in [false, true] {
            let mut thread = Vec::with_capacity(self.len);
            let mut key = if descending {
                self.head_desc
            } else {
                self.head_asc
            };
            while key.is_some() {
                thread.push(key);
                assert!(thread.len() <= self.len, "thread longer than len");
                let node = self.node(key);
                key = if descending { node.desc } else { node.asc };
            }

            for pair in thread.windows(2) {
                let (a, b) = (&self.node(pair[0]).value, &self.node(pair[1]).value);
                if descending {
                    assert!(a >= b, "descending thread out of order: {:?} < {:?}", a, b);
                } else {
                    assert!(a <= b, "ascending thread out of order: {:?} > {:?}", a, b);
                }
            }

            let mut members: Vec<usize> = thread.iter().map(|key| key.as_usize()).collect();
            members.sort_unstable();
            assert_eq!(members, primary, "thread and primary hold different nodes");
        }
    }
}
