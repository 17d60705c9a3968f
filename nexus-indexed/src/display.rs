//! Space-separated views of the three orders.

use core::fmt;

use crate::iter::{Iter, SortedIter};
use crate::{IndexedList, Key, Node, Storage};

/// Writes each item of an iterator separated by a single space.
///
/// Returned by [`IndexedList::display`], [`IndexedList::display_asc`] and
/// [`IndexedList::display_desc`].
#[derive(Clone)]
pub struct Listing<I> {
    iter: I,
}

impl<I> fmt::Display for Listing<I>
where
    I: Iterator + Clone,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut iter = self.iter.clone();
        if let Some(first) = iter.next() {
            write!(f, "{}", first)?;
            for value in iter {
                write!(f, " {}", value)?;
            }
        }
        Ok(())
    }
}

impl<T: fmt::Display, S, K: Key> IndexedList<T, S, K>
where
    S: Storage<Node<T, K>, Key = K>,
{
    /// Displays the primary sequence.
    ///
    /// ```
    /// use nexus_indexed::IndexedList;
    ///
    /// let list: IndexedList<u32> = IndexedList::from([3, 1, 2]);
    /// assert_eq!(list.display().to_string(), "3 1 2");
    /// assert_eq!(list.display_asc().to_string(), "1 2 3");
    /// assert_eq!(list.display_desc().to_string(), "3 2 1");
    /// ```
    pub fn display(&self) -> Listing<Iter<'_, T, S, K>> {
        Listing { iter: self.iter() }
    }

    /// Displays the ascending thread.
    pub fn display_asc(&self) -> Listing<SortedIter<'_, T, S, K>> {
        Listing {
            iter: self.iter_asc(),
        }
    }

    /// Displays the descending thread.
    pub fn display_desc(&self) -> Listing<SortedIter<'_, T, S, K>> {
        Listing {
            iter: self.iter_desc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::IndexedList;

    #[test]
    fn empty_list_displays_nothing() {
        let list: IndexedList<u32> = IndexedList::new();
        assert_eq!(list.display().to_string(), "");
        assert_eq!(list.display_asc().to_string(), "");
        assert_eq!(list.display_desc().to_string(), "");
    }

    #[test]
    fn views_after_mutation() {
        let mut list: IndexedList<i32> = IndexedList::from([4, -1, 7]);
        list.push_front(0);
        list.erase(2).unwrap();

        assert_eq!(list.display().to_string(), "0 4 7");
        assert_eq!(list.display_asc().to_string(), "0 4 7");
        assert_eq!(list.display_desc().to_string(), "7 4 0");

        list.reverse();
        assert_eq!(format!("{}", list.display()), "7 4 0");
    }

    #[test]
    fn strings_display_without_quotes() {
        let list: IndexedList<&str> = IndexedList::from(["pear", "apple"]);
        assert_eq!(list.display_asc().to_string(), "apple pear");
    }
}
