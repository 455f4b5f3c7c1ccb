//! Density repair, respacing, resizing, and the single-slot shifter.

use tracing::{debug, trace};

use super::OrderedList;
use crate::density::density;
use crate::error::{Error, Result};
use crate::segment::Segment;

impl OrderedList {
    /// Restore the density bounds around `segment`, which would hold
    /// `projected` values once the pending update lands.
    ///
    /// Climbs toward the root, folding in each sibling's occupancy, until an
    /// ancestor satisfies its bound; that ancestor is then respaced evenly.
    /// If the root itself is out of bounds the table doubles or halves.
    /// Slot indices held by the caller are stale afterwards.
    pub(crate) fn fix_density(&mut self, segment: Segment, projected: usize) -> Result<()> {
        let height = self.tree_height;
        let mut segment = segment;
        let mut count = projected;

        if density(count, segment.size) > self.bounds.upper_limit(segment.depth, height) {
            while density(count, segment.size) > self.bounds.upper_limit(segment.depth, height) {
                let (Some(parent), Some(sibling)) = (segment.parent(), segment.sibling()) else {
                    debug!(capacity = self.capacity(), count, "root overflow, doubling table");
                    self.table_doubling();
                    return self.distribute(self.root(), self.capacity());
                };
                count += self.count(sibling);
                segment = parent;
            }
            return self.distribute(segment, segment.size);
        }

        if density(count, segment.size) < self.bounds.lower_limit(segment.depth, height) {
            while density(count, segment.size) < self.bounds.lower_limit(segment.depth, height) {
                let (Some(parent), Some(sibling)) = (segment.parent(), segment.sibling()) else {
                    if height == 0 {
                        // A single leaf has nothing to halve.
                        return self.distribute(segment, segment.size);
                    }
                    debug!(capacity = self.capacity(), count, "root underflow, halving table");
                    self.distribute(segment, segment.size / 2)?;
                    return self.table_halving();
                };
                count += self.count(sibling);
                segment = parent;
            }
            return self.distribute(segment, segment.size);
        }

        Ok(())
    }

    /// Spread the values of `segment` evenly over its first `span` slots,
    /// keeping their order. The rest of the segment is left empty.
    pub(crate) fn distribute(&mut self, segment: Segment, span: usize) -> Result<()> {
        debug_assert!(span <= segment.size);
        let count = self.count(segment);
        if count > span {
            return Err(Error::Overpacked { count, span });
        }
        trace!(begin = segment.begin, size = segment.size, span, count, "redistributing");

        let values: Vec<i64> = self.slots[segment.range()]
            .iter_mut()
            .filter_map(Option::take)
            .collect();
        let last = values.len().saturating_sub(1).max(1);
        for (i, value) in values.into_iter().enumerate() {
            self.slots[segment.begin + i * (span - 1) / last] = Some(value);
        }
        Ok(())
    }

    /// Double the store, appending empty slots.
    pub(crate) fn table_doubling(&mut self) {
        debug_assert!(self.capacity() > 0);
        let capacity = self.capacity() * 2;
        self.slots.resize(capacity, None);
        self.tree_height += 1;
    }

    /// Halve the store, dropping its upper half. The upper half must be empty.
    pub(crate) fn table_halving(&mut self) -> Result<()> {
        let capacity = self.capacity();
        if capacity == 0 || self.tree_height == 0 {
            return Err(Error::TableUnderflow { capacity });
        }
        let half = capacity / 2;
        self.truncate(half)?;
        self.tree_height -= 1;
        Ok(())
    }

    /// Widen every leaf by one slot and respace the whole store.
    pub(crate) fn expand_blocks(&mut self) -> Result<()> {
        let leaves = self.leaf_count();
        self.block_size += 1;
        self.slots.resize(leaves * self.block_size, None);
        debug!(block_size = self.block_size, capacity = self.capacity(), "expanded blocks");
        self.distribute(self.root(), self.capacity())
    }

    /// Narrow every leaf by one slot and respace the whole store. The values
    /// must already sit inside the narrower prefix.
    pub(crate) fn shrink_blocks(&mut self) -> Result<()> {
        if self.block_size <= 1 {
            return Err(Error::TableUnderflow {
                capacity: self.capacity(),
            });
        }
        let leaves = self.leaf_count();
        self.block_size -= 1;
        self.truncate(leaves * self.block_size)?;
        debug!(block_size = self.block_size, capacity = self.capacity(), "shrank blocks");
        self.distribute(self.root(), self.capacity())
    }

    fn truncate(&mut self, capacity: usize) -> Result<()> {
        if self.slots[capacity..].iter().any(Option::is_some) {
            return Err(Error::Overpacked {
                count: self.count(self.root()),
                span: capacity,
            });
        }
        self.slots.truncate(capacity);
        Ok(())
    }

    /// Open one empty slot for a value belonging just before `position`.
    ///
    /// The nearest gap at or after `position` inside `segment` is preferred;
    /// failing that, the nearest gap before it. The run between the gap and
    /// `position` moves one step toward the gap. Returns the index of the
    /// opened slot, which is `position` or `position - 1`.
    pub(crate) fn push_way(&mut self, position: usize, segment: Segment) -> Result<usize> {
        let (begin, end) = (segment.begin, segment.end());
        debug_assert!(begin <= position && position <= end);

        if let Some(gap) = (position..end).find(|&i| self.slots[i].is_none()) {
            trace!(position, gap, "shifting run right");
            self.slots[position..=gap].rotate_right(1);
            return Ok(position);
        }
        if let Some(gap) = (begin..position).rev().find(|&i| self.slots[i].is_none()) {
            trace!(position, gap, "shifting run left");
            self.slots[gap..position].rotate_left(1);
            return Ok(position - 1);
        }
        Err(Error::NoFreeSlot {
            position,
            begin,
            end,
        })
    }
}
