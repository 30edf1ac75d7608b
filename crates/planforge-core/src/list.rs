//! Persistent singly linked list.
//!
//! [`PList`] is immutable and shares structure between versions: prepending
//! allocates one node and reuses the whole existing list as its tail. Partial
//! plans keep their action and subgoal lists in this form so that expanding a
//! node never copies or mutates its parent's lists.

use std::fmt;
use std::rc::Rc;

struct Node<T> {
    first: T,
    rest: PList<T>,
}

/// An immutable, reference-counted cons list.
pub struct PList<T> {
    head: Option<Rc<Node<T>>>,
}

impl<T> PList<T> {
    /// Returns the empty list.
    #[inline]
    pub fn empty() -> Self {
        Self { head: None }
    }

    /// Returns a one-element list.
    pub fn singleton(first: T) -> Self {
        Self::empty().prepend(first)
    }

    /// Returns a new list with `first` in front of `self`.
    ///
    /// `self` is shared, not copied.
    pub fn prepend(&self, first: T) -> Self {
        Self {
            head: Some(Rc::new(Node {
                first,
                rest: self.clone(),
            })),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first element, if any.
    pub fn first(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.first)
    }

    /// Returns the list after the first element, or the empty list.
    pub fn rest(&self) -> PList<T> {
        match &self.head {
            Some(node) => node.rest.clone(),
            None => Self::empty(),
        }
    }

    /// Splits the list into its first element and the remaining list.
    pub fn split_first(&self) -> Option<(&T, PList<T>)> {
        self.head
            .as_ref()
            .map(|node| (&node.first, node.rest.clone()))
    }

    /// Returns the number of elements. O(n).
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Returns true if both lists are the same list in memory.
    ///
    /// Two empty lists are always identical.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Clone> PList<T> {
    /// Returns the elements of `self` satisfying `predicate`, in order,
    /// followed by `tail`.
    ///
    /// The result shares the longest possible suffix with `self`: any run of
    /// kept elements whose filtered remainder is already identical to the
    /// original remainder is reused as is. In particular, when every element
    /// is kept and `tail` is empty, the result is `self` itself.
    ///
    /// # Example
    ///
    /// ```
    /// use planforge_core::PList;
    ///
    /// let list: PList<u32> = [1, 2, 3].into_iter().collect();
    /// let odd = list.filter(|n| n % 2 == 1, PList::empty());
    /// assert_eq!(odd.to_vec(), vec![1, 3]);
    ///
    /// let all = list.filter(|_| true, PList::empty());
    /// assert!(all.ptr_eq(&list));
    /// ```
    pub fn filter<P>(&self, mut predicate: P, tail: PList<T>) -> PList<T>
    where
        P: FnMut(&T) -> bool,
    {
        let nodes: Vec<&Rc<Node<T>>> = {
            let mut nodes = Vec::new();
            let mut cursor = &self.head;
            while let Some(node) = cursor {
                nodes.push(node);
                cursor = &node.rest.head;
            }
            nodes
        };

        // Rebuild back to front so each node sees its already-filtered remainder.
        let mut result = tail;
        for node in nodes.into_iter().rev() {
            if !predicate(&node.first) {
                continue;
            }
            result = if result.ptr_eq(&node.rest) {
                PList {
                    head: Some(Rc::clone(node)),
                }
            } else {
                result.prepend(node.first.clone())
            };
        }
        result
    }

    /// Copies the elements into a vector, first element first.
    pub fn to_vec(&self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        out.extend(self.iter().cloned());
        out
    }
}

impl<T> Clone for PList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for PList<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Drop for PList<T> {
    // Unlink uniquely owned nodes iteratively so long lists cannot overflow the stack.
    fn drop(&mut self) {
        let mut head = self.head.take();
        while let Some(node) = head {
            match Rc::try_unwrap(node) {
                Ok(mut node) => head = node.rest.head.take(),
                Err(_) => break,
            }
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for PList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for PList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for PList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(PList::empty(), |list, item| list.prepend(item))
    }
}

/// Borrowing iterator over a [`PList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.rest.head.as_deref();
            &node.first
        })
    }
}

impl<'a, T> IntoIterator for &'a PList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn list(items: &[u32]) -> PList<u32> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_prepend_shares_tail() {
        let tail = list(&[2, 3]);
        let longer = tail.prepend(1);

        assert_eq!(longer.to_vec(), vec![1, 2, 3]);
        assert!(longer.rest().ptr_eq(&tail));
        assert_eq!(tail.to_vec(), vec![2, 3]);
    }

    #[test]
    fn test_split_first() {
        let l = list(&[7, 8]);
        let (first, rest) = l.split_first().unwrap();
        assert_eq!(*first, 7);
        assert_eq!(rest.to_vec(), vec![8]);
        assert!(PList::<u32>::empty().split_first().is_none());
    }

    #[test]
    fn test_filter_all_kept_is_identity() {
        let l = list(&[1, 2, 3, 4]);
        let filtered = l.filter(|_| true, PList::empty());
        assert!(filtered.ptr_eq(&l));
    }

    #[test]
    fn test_filter_reuses_unchanged_suffix() {
        let l = list(&[1, 2, 3, 4]);
        let filtered = l.filter(|n| *n != 2, PList::empty());

        assert_eq!(filtered.to_vec(), vec![1, 3, 4]);
        // [3, 4] is untouched and must be the original nodes.
        let original_suffix = l.rest().rest();
        assert!(filtered.rest().ptr_eq(&original_suffix));
    }

    #[test]
    fn test_filter_appends_tail() {
        let l = list(&[1, 2, 3]);
        let tail = list(&[9]);
        let filtered = l.filter(|n| *n != 1, tail.clone());

        assert_eq!(filtered.to_vec(), vec![2, 3, 9]);
        assert!(filtered.rest().rest().ptr_eq(&tail));
    }

    #[test]
    fn test_filter_nothing_kept_returns_tail() {
        let l = list(&[1, 2]);
        let tail = list(&[5, 6]);
        assert!(l.filter(|_| false, tail.clone()).ptr_eq(&tail));
    }

    #[test]
    fn test_filter_leaves_receiver_untouched() {
        let l = list(&[1, 2, 3]);
        let _ = l.filter(|n| *n == 2, PList::empty());
        assert_eq!(l.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_lists_are_identical() {
        assert!(PList::<u8>::empty().ptr_eq(&PList::empty()));
        assert!(!list(&[1]).ptr_eq(&PList::empty()));
    }

    #[test]
    fn test_long_list_drops_without_overflow() {
        let l: PList<u32> = (0..200_000).collect();
        assert_eq!(l.first(), Some(&0));
        drop(l);
    }

    #[test]
    fn test_debug_format() {
        assert_eq!(format!("{:?}", list(&[1, 2])), "[1, 2]");
    }

    proptest! {
        #[test]
        fn prop_filter_matches_vec_filter(items in prop::collection::vec(0u32..20, 0..40), threshold in 0u32..20) {
            let l = list(&items);
            let expected: Vec<u32> = items.iter().copied().filter(|n| *n >= threshold).collect();
            prop_assert_eq!(l.filter(|n| *n >= threshold, PList::empty()).to_vec(), expected);
        }

        #[test]
        fn prop_filter_keeping_everything_is_identity(items in prop::collection::vec(any::<u32>(), 0..40)) {
            let l = list(&items);
            prop_assert!(l.filter(|_| true, PList::empty()).ptr_eq(&l));
        }
    }
}
