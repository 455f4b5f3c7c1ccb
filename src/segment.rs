//! Implicit segment tree over the slot store.
//!
//! The store is viewed as a complete binary tree: the whole store is the
//! root segment at depth 0, every segment splits into two halves one depth
//! deeper, and the leaves are `block_size` slots wide. Segments are views
//! computed on demand; nothing about them is stored.

use std::ops::Range;

/// A contiguous run of slots forming one node of the implicit tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Index of the first slot.
    pub begin: usize,
    /// Number of slots.
    pub size: usize,
    /// Distance from the root (the root has depth 0).
    pub depth: u32,
}

impl Segment {
    /// The segment spanning the whole store.
    pub fn root(capacity: usize) -> Self {
        Self {
            begin: 0,
            size: capacity,
            depth: 0,
        }
    }

    /// The leaf segment holding slot `index`.
    pub fn leaf_containing(index: usize, block_size: usize, tree_height: u32) -> Self {
        debug_assert!(block_size > 0);
        Self {
            begin: index - index % block_size,
            size: block_size,
            depth: tree_height,
        }
    }

    /// One past the last slot.
    #[inline]
    pub fn end(&self) -> usize {
        self.begin + self.size
    }

    /// Slot indices covered by this segment.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.begin..self.end()
    }

    /// Return true if this is the root segment.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    /// Return true if `index` falls inside this segment.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        self.range().contains(&index)
    }

    /// The other half of this segment's parent, or `None` at the root.
    pub fn sibling(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let begin = if (self.begin / self.size) % 2 == 0 {
            self.begin + self.size
        } else {
            self.begin - self.size
        };
        Some(Self { begin, ..*self })
    }

    /// The segment one level closer to the root, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        let size = self.size * 2;
        Some(Self {
            begin: self.begin - self.begin % size,
            size,
            depth: self.depth - 1,
        })
    }
}
