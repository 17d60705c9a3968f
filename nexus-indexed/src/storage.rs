//! Arena storage for list nodes.
//!
//! A [`Storage`] hands out stable [`Key`]s for the values it holds. A key
//! stays valid until its value is removed, and freed slots are reused by
//! later inserts. The list builds every link out of these keys, so releasing
//! a node is a single slot release and no link ever owns anything.
//!
//! Two backends ship with the crate:
//!
//! | Storage | Capacity | Key | Insert |
//! |---------|----------|-----|--------|
//! | `slab::Slab<T>` | Growable | `usize` | infallible ([`UnboundedStorage`]) |
//! | [`FixedSlab<T>`] | Fixed (runtime) | `u32` | `Err(Full)` when full ([`BoundedStorage`]) |

use core::fmt;

use slab::Slab;

use crate::Key;

/// Slab-like storage with stable keys.
///
/// # Requirements
///
/// - A key remains valid until the value under it is removed.
/// - `try_insert`, `remove`, `get` are O(1).
/// - Removed slots may be reused by later inserts.
pub trait Storage<T> {
    /// Key type handed out by this storage.
    type Key: Key;

    /// Creates empty storage with room for at least `capacity` values.
    ///
    /// For bounded storage `capacity` is the hard limit.
    fn with_capacity(capacity: usize) -> Self
    where
        Self: Sized;

    /// Inserts a value, returning its key.
    ///
    /// # Errors
    ///
    /// Returns `Err(Full(value))` if the storage cannot take another value.
    fn try_insert(&mut self, value: T) -> Result<Self::Key, Full<T>>;

    /// Removes and returns the value at `key`, if present.
    fn remove(&mut self, key: Self::Key) -> Option<T>;

    /// Returns a reference to the value at `key`, if present.
    fn get(&self, key: Self::Key) -> Option<&T>;

    /// Returns a mutable reference to the value at `key`, if present.
    fn get_mut(&mut self, key: Self::Key) -> Option<&mut T>;

    /// Returns a reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must name an occupied slot.
    unsafe fn get_unchecked(&self, key: Self::Key) -> &T;

    /// Returns a mutable reference without checking occupancy.
    ///
    /// # Safety
    ///
    /// `key` must name an occupied slot.
    unsafe fn get_unchecked_mut(&mut self, key: Self::Key) -> &mut T;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slot is occupied.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns how many more values fit before `try_insert` fails.
    fn remaining(&self) -> usize;

    /// Drops every value and frees every slot.
    fn clear(&mut self);
}

/// Storage with a fixed capacity.
pub trait BoundedStorage<T>: Storage<T> {
    /// Maximum number of values the storage holds at once.
    fn capacity(&self) -> usize;

    /// Returns `true` if no slot is free.
    fn is_full(&self) -> bool {
        self.remaining() == 0
    }
}

/// Growable storage where insertion cannot fail.
pub trait UnboundedStorage<T>: Storage<T> {
    /// Inserts a value, returning its key.
    fn insert(&mut self, value: T) -> Self::Key;
}

/// Error returned when fixed-capacity storage is full.
///
/// Carries the value that could not be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Full<T>(pub T);

impl<T> Full<T> {
    /// Returns the rejected value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage is full")
    }
}

impl<T: fmt::Debug> std::error::Error for Full<T> {}

// =============================================================================
// slab::Slab - growable
// =============================================================================

impl<T> Storage<T> for Slab<T> {
    type Key = usize;

    #[inline]
    fn with_capacity(capacity: usize) -> Self {
        Slab::with_capacity(capacity)
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<usize, Full<T>> {
        Ok(Slab::insert(self, value))
    }

    #[inline]
    fn remove(&mut self, key: usize) -> Option<T> {
        Slab::try_remove(self, key)
    }

    #[inline]
    fn get(&self, key: usize) -> Option<&T> {
        Slab::get(self, key)
    }

    #[inline]
    fn get_mut(&mut self, key: usize) -> Option<&mut T> {
        Slab::get_mut(self, key)
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: usize) -> &T {
        unsafe { Slab::get_unchecked(self, key) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: usize) -> &mut T {
        unsafe { Slab::get_unchecked_mut(self, key) }
    }

    #[inline]
    fn len(&self) -> usize {
        Slab::len(self)
    }

    #[inline]
    fn remaining(&self) -> usize {
        usize::MAX - Slab::len(self)
    }

    #[inline]
    fn clear(&mut self) {
        Slab::clear(self);
    }
}

impl<T> UnboundedStorage<T> for Slab<T> {
    #[inline]
    fn insert(&mut self, value: T) -> usize {
        Slab::insert(self, value)
    }
}

// =============================================================================
// FixedSlab - runtime capacity, never grows past it
// =============================================================================

/// Fixed-capacity storage with `u32` keys.
///
/// Backed by a [`Slab`] allocated once up front. Inserting into a full
/// `FixedSlab` returns [`Full`] instead of reallocating, so a list built on
/// it never allocates after construction.
///
/// # Example
///
/// ```
/// use nexus_indexed::{BoundedStorage, FixedSlab, Storage};
///
/// let mut storage: FixedSlab<u64> = FixedSlab::with_capacity(2);
/// let a = storage.try_insert(1).unwrap();
/// storage.try_insert(2).unwrap();
///
/// assert!(storage.is_full());
/// assert_eq!(storage.try_insert(3).unwrap_err().into_inner(), 3);
///
/// assert_eq!(storage.remove(a), Some(1));
/// assert_eq!(storage.remaining(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FixedSlab<T> {
    slab: Slab<T>,
    capacity: usize,
}

impl<T> Storage<T> for FixedSlab<T> {
    type Key = u32;

    /// # Panics
    ///
    /// Panics if `capacity` does not fit below `u32::NONE`.
    fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity < u32::NONE.as_usize(),
            "capacity exceeds key type maximum"
        );
        Self {
            slab: Slab::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    fn try_insert(&mut self, value: T) -> Result<u32, Full<T>> {
        if self.slab.len() >= self.capacity {
            return Err(Full(value));
        }
        // Vacant slots are reused before the slab grows, so every slot
        // number stays below `capacity`.
        Ok(u32::from_usize(self.slab.insert(value)))
    }

    #[inline]
    fn remove(&mut self, key: u32) -> Option<T> {
        self.slab.try_remove(key.as_usize())
    }

    #[inline]
    fn get(&self, key: u32) -> Option<&T> {
        self.slab.get(key.as_usize())
    }

    #[inline]
    fn get_mut(&mut self, key: u32) -> Option<&mut T> {
        self.slab.get_mut(key.as_usize())
    }

    #[inline]
    unsafe fn get_unchecked(&self, key: u32) -> &T {
        unsafe { self.slab.get_unchecked(key.as_usize()) }
    }

    #[inline]
    unsafe fn get_unchecked_mut(&mut self, key: u32) -> &mut T {
        unsafe { self.slab.get_unchecked_mut(key.as_usize()) }
    }

    #[inline]
    fn len(&self) -> usize {
        self.slab.len()
    }

    #[inline]
    fn remaining(&self) -> usize {
        self.capacity - self.slab.len()
    }

    #[inline]
    fn clear(&mut self) {
        self.slab.clear();
    }
}

impl<T> BoundedStorage<T> for FixedSlab<T> {
    #[inline]
    fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slab_insert_get_remove() {
        let mut storage: Slab<u64> = Slab::with_capacity(4);

        let key = storage.try_insert(42).unwrap();
        assert_eq!(storage.get(key), Some(&42));
        assert_eq!(storage.len(), 1);

        assert_eq!(storage.try_remove(key), Some(42));
        assert_eq!(storage.get(key), None);
        assert_eq!(storage.try_remove(key), None);
    }

    #[test]
    fn slab_grows_past_initial_capacity() {
        let mut storage: Slab<u64> = Slab::with_capacity(2);
        for i in 0..100 {
            storage.try_insert(i).unwrap();
        }
        assert_eq!(storage.len(), 100);
        assert!(storage.remaining() > 100);
    }

    #[test]
    fn fixed_fill_to_capacity() {
        let mut storage: FixedSlab<u64> = FixedSlab::with_capacity(4);

        let keys: Vec<u32> = (0..4).map(|i| storage.try_insert(i).unwrap()).collect();
        assert!(storage.is_full());
        assert_eq!(storage.remaining(), 0);

        let err = storage.try_insert(4).unwrap_err();
        assert_eq!(err, Full(4));

        for (i, key) in keys.iter().enumerate() {
            assert_eq!(storage.get(*key), Some(&(i as u64)));
            assert!(key.as_usize() < storage.capacity());
        }
    }

    #[test]
    fn fixed_slot_reuse() {
        let mut storage: FixedSlab<u64> = FixedSlab::with_capacity(2);

        let k0 = storage.try_insert(0).unwrap();
        storage.try_insert(1).unwrap();
        storage.remove(k0);

        let k2 = storage.try_insert(2).unwrap();
        assert_eq!(k2, k0);
        assert!(storage.is_full());
    }

    #[test]
    fn fixed_get_mut_and_clear() {
        let mut storage: FixedSlab<u64> = FixedSlab::with_capacity(8);

        let key = storage.try_insert(10).unwrap();
        *storage.get_mut(key).unwrap() = 20;
        assert_eq!(storage.get(key), Some(&20));

        storage.clear();
        assert!(storage.is_empty());
        assert_eq!(storage.remaining(), 8);
    }

    #[test]
    #[should_panic(expected = "capacity exceeds key type maximum")]
    fn fixed_rejects_capacity_beyond_key_range() {
        let _ = FixedSlab::<u8>::with_capacity(u32::MAX as usize);
    }

    #[test]
    fn drop_cleans_up() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static DROP_COUNT: AtomicUsize = AtomicUsize::new(0);

        #[derive(Debug)]
        struct DropCounter;
        impl Drop for DropCounter {
            fn drop(&mut self) {
                DROP_COUNT.fetch_add(1, Ordering::SeqCst);
            }
        }

        {
            let mut storage: FixedSlab<DropCounter> = FixedSlab::with_capacity(8);
            storage.try_insert(DropCounter).unwrap();
            storage.try_insert(DropCounter).unwrap();
            storage.try_insert(DropCounter).unwrap();
        }

        assert_eq!(DROP_COUNT.load(Ordering::SeqCst), 3);
    }
}
