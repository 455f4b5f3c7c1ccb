//! Packed memory array holding a sorted multiset of integers.
//!
//! # Layout
//!
//! Values live in a single `Vec<Option<i64>>`. Reading the occupied slots left
//! to right yields the multiset in non-decreasing order; empty slots (gaps)
//! are interleaved so that an insertion only has to shift the run of values
//! between its position and the nearest gap.
//!
//! The store is `block_size << tree_height` slots long. Leaves of the implicit
//! segment tree are `block_size` slots wide, and `block_size` tracks
//! $\lfloor \log_2(n + 1) \rfloor + 1$ so that leaf scans stay logarithmic.
//!
//! # Updates
//!
//! Before an insertion lands in a leaf, the leaf's projected density is
//! checked against [`DensityBounds`]. An overflowing leaf climbs toward the
//! root until an ancestor can absorb the new element, and that ancestor is
//! respaced evenly. If even the root overflows the table doubles. Deletions
//! are symmetric, halving the table when the root underflows.

use std::fmt;
use std::iter::FusedIterator;

use crate::density::{density, DensityBounds};
use crate::error::Result;
use crate::segment::Segment;

mod rebalance;
mod search;

#[cfg(test)]
mod proptests;

/// Leaf width for a list holding `n` values: $\lfloor \log_2(n + 1) \rfloor + 1$.
#[inline]
pub(crate) fn block_size_for(n: usize) -> usize {
    (n + 1).ilog2() as usize + 1
}

/// A sorted multiset of integers stored in a packed memory array.
///
/// ```rust
/// use oblivion::OrderedList;
///
/// let mut list = OrderedList::new();
/// for x in [5, 1, 3] {
///     list.include(x).unwrap();
/// }
/// assert_eq!(list.successor(1), Some(3));
/// assert_eq!(list.to_string(), "1 3 5");
/// ```
#[derive(Clone)]
pub struct OrderedList {
    slots: Vec<Option<i64>>,
    len: usize,
    block_size: usize,
    tree_height: u32,
    bounds: DensityBounds,
}

impl Default for OrderedList {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OrderedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("block_size", &self.block_size)
            .field("tree_height", &self.tree_height)
            .finish()
    }
}

impl OrderedList {
    /// Create an empty list with the default density bounds.
    pub fn new() -> Self {
        Self::with_bounds(DensityBounds::default())
    }

    /// Create an empty list that rebalances according to `bounds`.
    pub fn with_bounds(bounds: DensityBounds) -> Self {
        Self {
            slots: Vec::new(),
            len: 0,
            block_size: 0,
            tree_height: 0,
            bounds,
        }
    }

    /// Return the number of stored values, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return true if the list holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total number of slots, occupied or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Width of a leaf segment.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of halvings from the whole store down to a leaf.
    pub fn tree_height(&self) -> u32 {
        self.tree_height
    }

    /// The density policy in effect.
    pub fn bounds(&self) -> &DensityBounds {
        &self.bounds
    }

    /// Insert `x`, keeping any copies already present.
    ///
    /// An error means a structural invariant broke mid-update; the list must
    /// not be used afterwards.
    pub fn include(&mut self, x: i64) -> Result<()> {
        let target = block_size_for(self.len + 1);
        while self.block_size < target {
            self.expand_blocks()?;
        }

        let mut position = self.insertion_point(x);
        let leaf = self.leaf_of(position);
        let projected = self.count(leaf) + 1;
        if density(projected, leaf.size) > self.bounds.upper_limit(leaf.depth, self.tree_height) {
            self.fix_density(leaf, projected)?;
            // Respacing moved the values around; look the position up again.
            position = self.insertion_point(x);
        }

        let mut segment = self.leaf_of(position);
        while self.count(segment) >= segment.size {
            match segment.parent() {
                Some(parent) => segment = parent,
                None => break,
            }
        }

        let slot = self.push_way(position, segment)?;
        self.slots[slot] = Some(x);
        self.len += 1;
        Ok(())
    }

    /// Remove one copy of `x`. Does nothing if `x` is absent.
    ///
    /// An error means a structural invariant broke mid-update; the list must
    /// not be used afterwards.
    pub fn erase(&mut self, x: i64) -> Result<()> {
        let Some(index) = self.binary_search(x, 0, self.capacity()) else {
            return Ok(());
        };
        self.slots[index] = None;
        let remaining = self.len - 1;

        let target = block_size_for(remaining);
        if target < self.block_size {
            while remaining > self.leaf_count() * target {
                self.table_doubling();
                self.distribute(self.root(), self.capacity())?;
            }
            self.distribute(self.root(), self.leaf_count() * target)?;
            self.shrink_blocks()?;
        }

        let leaf = self.leaf_of(index);
        let count = self.count(leaf);
        if density(count, leaf.size) < self.bounds.lower_limit(leaf.depth, self.tree_height) {
            self.fix_density(leaf, count)?;
        }

        self.len = remaining;
        Ok(())
    }

    /// Smallest stored value strictly greater than `x`.
    pub fn successor(&self, x: i64) -> Option<i64> {
        self.suc_idx(x, 0, self.capacity())
            .and_then(|index| self.slots[index])
    }

    /// Return true if at least one copy of `x` is stored.
    pub fn contains(&self, x: i64) -> bool {
        self.binary_search(x, 0, self.capacity()).is_some()
    }

    /// Iterate over the stored values in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
        }
    }

    /// Boundary before which `x` belongs: the slot of its strict successor,
    /// or `capacity()` when `x` is a new maximum.
    fn insertion_point(&self, x: i64) -> usize {
        self.suc_idx(x, 0, self.capacity())
            .unwrap_or(self.capacity())
    }

    fn root(&self) -> Segment {
        Segment::root(self.capacity())
    }

    /// Leaf owning slot `index`. The end boundary maps to the last leaf.
    fn leaf_of(&self, index: usize) -> Segment {
        let index = index.min(self.capacity().saturating_sub(1));
        Segment::leaf_containing(index, self.block_size, self.tree_height)
    }

    fn leaf_count(&self) -> usize {
        if self.block_size == 0 {
            1
        } else {
            self.capacity() / self.block_size
        }
    }

    fn count(&self, segment: Segment) -> usize {
        self.slots[segment.range()]
            .iter()
            .filter(|slot| slot.is_some())
            .count()
    }
}

/// Ascending iterator over the values of an [`OrderedList`].
///
/// Created by [`OrderedList::iter`]; call it again to restart.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    slots: std::slice::Iter<'a, Option<i64>>,
}

impl Iterator for Iter<'_> {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        self.slots.find_map(|slot| *slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.slots.len()))
    }
}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OrderedList {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// Space-separated values in ascending order, with nothing for an empty list.
impl fmt::Display for OrderedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut values = self.iter();
        if let Some(first) = values.next() {
            write!(f, "{first}")?;
            for value in values {
                write!(f, " {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i64]) -> OrderedList {
        let mut list = OrderedList::new();
        for &v in values {
            list.include(v).unwrap();
        }
        list
    }

    #[test]
    fn empty_list() {
        let list = OrderedList::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 0);
        assert_eq!(list.to_string(), "");
        assert_eq!(list.successor(0), None);
        assert_eq!(list.successor(i64::MIN), None);
        assert!(!list.contains(0));
    }

    #[test]
    fn erase_on_empty_is_noop() {
        let mut list = OrderedList::new();
        list.erase(7).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 0);
    }

    #[test]
    fn block_size_formula() {
        assert_eq!(block_size_for(0), 1);
        assert_eq!(block_size_for(1), 2);
        assert_eq!(block_size_for(2), 2);
        assert_eq!(block_size_for(3), 3);
        assert_eq!(block_size_for(6), 3);
        assert_eq!(block_size_for(7), 4);
        assert_eq!(block_size_for(1023), 11);
    }

    #[test]
    fn first_insertions_shape_the_store() {
        let mut list = OrderedList::new();
        list.include(1).unwrap();
        assert_eq!((list.capacity(), list.block_size(), list.tree_height()), (2, 2, 0));

        list.include(0).unwrap();
        list.include(2).unwrap();
        assert_eq!((list.capacity(), list.block_size(), list.tree_height()), (3, 3, 0));
        assert_eq!(list.to_string(), "0 1 2");

        // A full single-leaf store doubles.
        list.include(20).unwrap();
        assert_eq!((list.capacity(), list.block_size(), list.tree_height()), (6, 3, 1));
        assert_eq!(list.to_string(), "0 1 2 20");
    }

    #[test]
    fn literal_scenario() {
        let mut list = list_of(&[1, 0, 2, 20, 5, 3, 4, 40, 6]);
        assert_eq!(list.len(), 9);
        assert_eq!(list.to_string(), "0 1 2 3 4 5 6 20 40");

        for x in [4, 1, 5] {
            list.erase(x).unwrap();
        }
        assert_eq!(list.to_string(), "0 2 3 6 20 40");
        assert_eq!(list.len(), 6);

        assert_eq!(list.successor(3), Some(6));
        assert_eq!(list.successor(40), None);
        assert_eq!(list.successor(-5), Some(0));
    }

    #[test]
    fn duplicates_are_retained() {
        let mut list = list_of(&[3, 3, 1, 3]);
        assert_eq!(list.len(), 4);
        assert_eq!(list.to_string(), "1 3 3 3");
        assert_eq!(list.successor(1), Some(3));
        assert_eq!(list.successor(3), None);

        list.erase(3).unwrap();
        assert_eq!(list.to_string(), "1 3 3");
        assert!(list.contains(3));
    }

    #[test]
    fn erase_absent_leaves_list_unchanged() {
        let mut list = list_of(&[10, 20, 30]);
        let before = (list.len(), list.capacity(), list.to_string());
        list.erase(15).unwrap();
        assert_eq!((list.len(), list.capacity(), list.to_string()), before);
    }

    #[test]
    fn erase_everything() {
        let values: Vec<i64> = (0..200).map(|i| (i * 37) % 101).collect();
        let mut list = list_of(&values);
        for &v in &values {
            list.erase(v).unwrap();
        }
        assert!(list.is_empty());
        assert_eq!(list.to_string(), "");
        assert_eq!(list.successor(-1), None);

        // Still usable afterwards.
        list.include(42).unwrap();
        assert_eq!(list.to_string(), "42");
    }

    #[test]
    fn descending_and_ascending_runs() {
        let mut list = OrderedList::new();
        for x in (0..300).rev() {
            list.include(x).unwrap();
        }
        for x in 300..600 {
            list.include(x).unwrap();
        }
        let expected: Vec<i64> = (0..600).collect();
        assert_eq!(list.iter().collect::<Vec<_>>(), expected);
        assert_eq!(list.successor(299), Some(300));
        assert_eq!(list.successor(599), None);
    }

    #[test]
    fn capacity_grows_and_shrinks_with_len() {
        let mut list = OrderedList::new();
        for x in 0..1024 {
            list.include(x).unwrap();
        }
        let peak = list.capacity();
        assert!(peak >= 1024);
        assert!(peak <= 8 * 1025);

        for x in 0..1000 {
            list.erase(x).unwrap();
        }
        assert_eq!(list.len(), 24);
        assert!(list.capacity() < peak);
        assert_eq!(list.iter().collect::<Vec<_>>(), (1000..1024).collect::<Vec<_>>());
    }

    #[test]
    fn iteration_restarts() {
        let list = list_of(&[4, 2, 9]);
        let first: Vec<i64> = list.iter().collect();
        let second: Vec<i64> = (&list).into_iter().collect();
        assert_eq!(first, vec![2, 4, 9]);
        assert_eq!(first, second);
    }

    #[test]
    fn custom_bounds() {
        let bounds = DensityBounds::new(0.3, 0.6, 0.1, 0.9).unwrap();
        let mut list = OrderedList::with_bounds(bounds);
        for x in (0..500).map(|i| (i * 7919) % 1000) {
            list.include(x).unwrap();
        }
        assert_eq!(list.bounds(), &bounds);
        let values: Vec<i64> = list.iter().collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(values.len(), 500);
    }

    #[test]
    fn debug_summarizes_geometry() {
        let list = list_of(&[1, 2, 3]);
        let s = format!("{list:?}");
        assert!(s.contains("len: 3"));
        assert!(s.contains("block_size: 3"));
    }
}
