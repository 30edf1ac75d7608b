//! Priority frontier of not-yet-expanded search nodes.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::FrontierError;

/// A heap entry ordered so the lowest score sits on top.
struct Entry<T> {
    score: f64,
    sequence: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: lower score = higher priority, earlier insertion wins ties.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Binary min-heap of items keyed by a floating-point score.
///
/// Items with equal scores come out in insertion order.
///
/// # Example
///
/// ```
/// use planforge_planner::Frontier;
///
/// let mut frontier = Frontier::new();
/// frontier.insert("far", 5.0);
/// frontier.insert("near", 1.0);
///
/// assert_eq!(frontier.extract_min(), Ok((1.0, "near")));
/// assert_eq!(frontier.len(), 1);
/// ```
pub struct Frontier<T> {
    heap: BinaryHeap<Entry<T>>,
    sequence: u64,
}

impl<T> Frontier<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// Adds `item` with priority `score`. O(log n).
    pub fn insert(&mut self, item: T, score: f64) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.heap.push(Entry {
            score,
            sequence,
            item,
        });
    }

    /// Removes and returns the lowest-scored item. O(log n).
    ///
    /// # Errors
    ///
    /// Returns [`FrontierError::Empty`] if the frontier holds nothing.
    pub fn extract_min(&mut self) -> Result<(f64, T), FrontierError> {
        self.heap
            .pop()
            .map(|entry| (entry.score, entry.item))
            .ok_or(FrontierError::Empty)
    }

    /// Returns the lowest score without removing anything.
    pub fn peek_min_score(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.score)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<T> Default for Frontier<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for Frontier<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frontier")
            .field("len", &self.len())
            .field("min_score", &self.peek_min_score())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_in_score_order() {
        let mut frontier = Frontier::new();
        for (item, score) in [("c", 3.0), ("a", 1.0), ("d", 4.5), ("b", 2.0)] {
            frontier.insert(item, score);
        }

        let order: Vec<&str> = std::iter::from_fn(|| frontier.extract_min().ok())
            .map(|(_, item)| item)
            .collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_ties_extract_in_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.insert(1, 2.0);
        frontier.insert(2, 2.0);
        frontier.insert(3, 2.0);

        assert_eq!(frontier.extract_min(), Ok((2.0, 1)));
        assert_eq!(frontier.extract_min(), Ok((2.0, 2)));
        assert_eq!(frontier.extract_min(), Ok((2.0, 3)));
    }

    #[test]
    fn test_empty_extraction_fails() {
        let mut frontier: Frontier<u8> = Frontier::new();
        assert!(frontier.is_empty());
        assert_eq!(frontier.extract_min(), Err(FrontierError::Empty));
    }

    #[test]
    fn test_peek_min_score() {
        let mut frontier = Frontier::new();
        assert_eq!(frontier.peek_min_score(), None);
        frontier.insert('x', 9.0);
        frontier.insert('y', 0.5);
        assert_eq!(frontier.peek_min_score(), Some(0.5));
        assert_eq!(frontier.len(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(u16),
        Extract,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u16..500).prop_map(Op::Insert),
            Just(Op::Extract),
        ]
    }

    proptest! {
        #[test]
        fn prop_extract_is_minimum_of_remaining(ops in prop::collection::vec(op(), 0..200)) {
            let mut frontier = Frontier::new();
            let mut shadow: Vec<f64> = Vec::new();

            for op in ops {
                match op {
                    Op::Insert(score) => {
                        let score = f64::from(score) / 4.0;
                        frontier.insert(score, score);
                        shadow.push(score);
                    }
                    Op::Extract => {
                        if shadow.is_empty() {
                            prop_assert_eq!(frontier.extract_min(), Err(FrontierError::Empty));
                            continue;
                        }
                        let (score, item) = frontier.extract_min().unwrap();
                        prop_assert_eq!(score, item);
                        let pos = shadow.iter().position(|s| *s == score).unwrap();
                        shadow.swap_remove(pos);
                        prop_assert!(shadow.iter().all(|rest| score <= *rest));
                    }
                }
                prop_assert_eq!(frontier.len(), shadow.len());
                prop_assert_eq!(frontier.is_empty(), shadow.is_empty());
            }
        }
    }
}
