//! Error types for list operations.

use core::fmt;

use crate::Full;

/// Precondition failures reported by [`IndexedList`](crate::IndexedList).
///
/// Every operation checks its preconditions before touching a link, so an
/// `Err` always leaves the list exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The list has no element to return or remove.
    Empty,
    /// A position fell outside the list.
    OutOfRange {
        /// The position that was requested.
        index: usize,
        /// Length of the list at the time of the call.
        len: usize,
    },
    /// The storage has no free slot for another node.
    Full,
    /// A node chain handed to
    /// [`IndexedList::from_chain`](crate::IndexedList::from_chain) named a
    /// vacant slot, looped, or left occupied slots unreached.
    InvalidChain,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "list is empty"),
            Error::OutOfRange { index, len } => {
                write!(f, "index {} out of range for list of length {}", index, len)
            }
            Error::Full => write!(f, "storage is full"),
            Error::InvalidChain => {
                write!(f, "node chain is broken or does not cover its storage")
            }
        }
    }
}

impl std::error::Error for Error {}

impl<T> From<Full<T>> for Error {
    #[inline]
    fn from(_: Full<T>) -> Self {
        Error::Full
    }
}
