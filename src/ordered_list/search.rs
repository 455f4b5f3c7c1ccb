//! Gap-tolerant binary searches.
//!
//! Both searches probe the midpoint of the current range and scan outward
//! past empty slots to find an occupied pivot. The range then shrinks to one
//! side of the pivot's index rather than of the geometric midpoint, so each
//! step strictly narrows it and the loop always terminates, even on a store
//! whose density bounds have been violated.

use super::OrderedList;

impl OrderedList {
    /// Index of some slot in `[begin, end)` holding `x`.
    pub(crate) fn binary_search(&self, x: i64, begin: usize, end: usize) -> Option<usize> {
        let (mut lo, mut hi) = (begin, end);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let (pivot, value) = self
                .first_occupied(mid, hi)
                .or_else(|| self.last_occupied(lo, mid))?;
            match x.cmp(&value) {
                std::cmp::Ordering::Equal => return Some(pivot),
                std::cmp::Ordering::Less => hi = pivot,
                std::cmp::Ordering::Greater => lo = pivot + 1,
            }
        }
        None
    }

    /// Index of the leftmost slot in `[begin, end)` holding the smallest
    /// value strictly greater than `x`.
    pub(crate) fn suc_idx(&self, x: i64, begin: usize, end: usize) -> Option<usize> {
        let (mut lo, mut hi) = (begin, end);
        // Leftmost known slot above `x`, sitting at `hi`.
        let mut best = None;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if let Some((left, value)) = self.last_occupied(lo, mid + 1) {
                if x < value {
                    best = Some(left);
                    hi = left;
                    continue;
                }
            }
            // Everything up to `mid` is at most `x`.
            match self.first_occupied(mid + 1, hi) {
                Some((right, value)) if x < value => return Some(right),
                Some((right, _)) => lo = right + 1,
                None => break,
            }
        }
        best
    }

    fn first_occupied(&self, from: usize, to: usize) -> Option<(usize, i64)> {
        (from..to).find_map(|i| self.slots[i].map(|v| (i, v)))
    }

    fn last_occupied(&self, from: usize, to: usize) -> Option<(usize, i64)> {
        (from..to).rev().find_map(|i| self.slots[i].map(|v| (i, v)))
    }
}
