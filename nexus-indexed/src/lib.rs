//! A list kept in insertion order and in sorted order at the same time.
//!
//! [`IndexedList`] threads one set of nodes through three orders:
//!
//! ```text
//! primary     head ⇄ n0 ⇄ n1 ⇄ n2 ⇄ tail     insertion order, doubly linked
//! ascending   head_asc  → n1 → n2 → n0        by value, non-decreasing
//! descending  head_desc → n0 → n2 → n1        by value, non-increasing
//! ```
//!
//! Every mutation patches all three, so the smallest and largest values are
//! always one link away and a sorted walk never sorts.
//!
//! # Design
//!
//! Nodes live in a [`Storage`] owned by the list and every link is a storage
//! [`Key`]. A key is stable until its node is removed, and removing a node is
//! a single slot release:
//!
//! ```text
//! Storage (Slab)  - owns nodes, hands out stable keys
//! IndexedList     - coordinates keys through three orders
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_indexed::IndexedList;
//!
//! let mut prices: IndexedList<u32> = IndexedList::new();
//! prices.push_back(101);
//! prices.push_back(99);
//! let key = prices.push_back(105);
//!
//! assert_eq!(prices.smallest(), Some(&99));
//! assert_eq!(prices.largest(), Some(&105));
//!
//! // Removal by key or by position keeps every order intact
//! assert_eq!(prices.remove_key(key), Some(105));
//! assert_eq!(prices.largest(), Some(&101));
//! assert_eq!(prices.display_desc().to_string(), "101 99");
//! ```
//!
//! # Errors
//!
//! Positional and end operations return [`Error`] instead of panicking, and
//! check before touching any link:
//!
//! ```
//! use nexus_indexed::{Error, IndexedList};
//!
//! let mut list: IndexedList<u32> = IndexedList::from([1, 2]);
//!
//! assert_eq!(list.erase(5), Err(Error::OutOfRange { index: 5, len: 2 }));
//! assert_eq!(list.insert(3, 0), Err(Error::OutOfRange { index: 3, len: 2 }));
//! assert_eq!(list.len(), 2);
//!
//! list.clear();
//! assert_eq!(list.pop_front(), Err(Error::Empty));
//! assert_eq!(list.find(&1), None);
//! ```
//!
//! # Storage Options
//!
//! | Storage | Capacity | Key | Pushes |
//! |---------|----------|-----|--------|
//! | [`SlabStorage`] (default) | Growable | `usize` | `push_*`, infallible |
//! | [`FixedStorage`] | Fixed (runtime) | `u32` | `try_push_*`, `Err(Full)` |
//!
//! ```text
//! Storage<T>           - base trait: try_insert, get, remove, len
//!     │
//!     ├── BoundedStorage<T>   - fixed capacity
//!     │
//!     └── UnboundedStorage<T> - growable, insert -> Key (infallible)
//! ```
//!
//! # Logging
//!
//! Bulk operations (`sort`, `merge`, `splice`, `resize`, `clear`) emit
//! `tracing` events at `TRACE` level. Per-element operations emit nothing.

#![warn(missing_docs)]

mod display;
mod error;
pub mod iter;
pub mod key;
pub mod list;
mod node;
mod order;
mod sort;
pub mod storage;

pub use display::Listing;
pub use error::Error;
pub use iter::{IntoIter, Iter, Keys, SortedIter};
pub use key::Key;
pub use list::{FixedIndexedList, FixedStorage, IndexedList, SlabStorage};
pub use node::Node;
pub use storage::{BoundedStorage, FixedSlab, Full, Storage, UnboundedStorage};
