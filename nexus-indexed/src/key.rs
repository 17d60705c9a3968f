//! Node handles.
//!
//! Every link in an [`IndexedList`](crate::IndexedList) is a [`Key`]: a small
//! copyable integer naming a storage slot. A reserved sentinel, [`Key::NONE`],
//! stands in for a null link, so a node's four links cost four integers and
//! no `Option` discriminants.

/// A storage slot handle with a sentinel "no node" value.
///
/// # Example
///
/// ```
/// use nexus_indexed::Key;
///
/// let key: u32 = 7;
/// assert!(key.is_some());
/// assert!(u32::NONE.is_none());
/// assert_eq!(u32::from_usize(7), key);
/// ```
pub trait Key: Copy + Eq + core::fmt::Debug {
    /// Sentinel used for empty links.
    const NONE: Self;

    /// Converts a storage slot number into a key.
    fn from_usize(val: usize) -> Self;

    /// Returns the storage slot number.
    fn as_usize(&self) -> usize;

    /// Returns `true` if this is the sentinel.
    #[inline]
    fn is_none(&self) -> bool {
        *self == Self::NONE
    }

    /// Returns `true` if this names a slot.
    #[inline]
    fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// Maps the sentinel to `None`.
    #[inline]
    fn get(self) -> Option<Self> {
        if self.is_none() { None } else { Some(self) }
    }
}

macro_rules! impl_key_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Key for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }

                #[inline]
                fn as_usize(&self) -> usize {
                    *self as usize
                }
            }
        )*
    };
}

impl_key_for_unsigned!(u16, u32, u64, usize);
