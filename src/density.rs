//! Per-depth occupancy bounds.
//!
//! # Theory
//!
//! A segment at depth $d$ of a tree of height $h$ must keep its density
//! $\rho = \text{occupied} / \text{size}$ inside $[\tau^-_d, \tau^+_d]$, where
//! both bounds are linear interpolations between the root values
//! ($d = 0$) and the leaf values ($d = h$):
//!
//! $$\tau^+_d = \tau^+_0 + (\tau^+_h - \tau^+_0) \cdot d / h$$
//!
//! Bounds are tightest at the root and loosest at the leaves. A small
//! segment may therefore drift far from the average while a large one is
//! forced to stay near it, which is what bounds the amortized cost of
//! rebalancing to $O(\log^2 n)$ slot moves per update.

use crate::error::{Error, Result};

/// Lower and upper density bounds at the root and at the leaves.
///
/// The default is `[0.5, 0.75]` at the root and `[0.25, 1.0]` at the leaves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityBounds {
    root_lower: f64,
    root_upper: f64,
    leaf_lower: f64,
    leaf_upper: f64,
}

impl Default for DensityBounds {
    fn default() -> Self {
        Self {
            root_lower: 0.5,
            root_upper: 0.75,
            leaf_lower: 0.25,
            leaf_upper: 1.0,
        }
    }
}

impl DensityBounds {
    /// Build a validated set of bounds.
    ///
    /// Requires `0 <= leaf_lower <= root_lower <= 0.5` and
    /// `root_lower < root_upper <= leaf_upper <= 1`. Lower bounds above one
    /// half would make halving the table overflow its remaining half.
    pub fn new(root_lower: f64, root_upper: f64, leaf_lower: f64, leaf_upper: f64) -> Result<Self> {
        let finite = [root_lower, root_upper, leaf_lower, leaf_upper]
            .iter()
            .all(|b| b.is_finite());
        if !finite {
            return Err(Error::InvalidBounds("bounds must be finite".to_string()));
        }
        let lower_ok = 0.0 <= leaf_lower && leaf_lower <= root_lower && root_lower <= 0.5;
        if !lower_ok {
            return Err(Error::InvalidBounds(format!(
                "lower bounds must satisfy 0 <= leaf ({leaf_lower}) <= root ({root_lower}) <= 0.5"
            )));
        }
        let upper_ok = root_lower < root_upper && root_upper <= leaf_upper && leaf_upper <= 1.0;
        if !upper_ok {
            return Err(Error::InvalidBounds(format!(
                "upper bounds must satisfy root lower ({root_lower}) < root ({root_upper}) <= leaf ({leaf_upper}) <= 1"
            )));
        }
        Ok(Self {
            root_lower,
            root_upper,
            leaf_lower,
            leaf_upper,
        })
    }

    /// Maximum density allowed at `depth` in a tree of `tree_height` levels.
    pub fn upper_limit(&self, depth: u32, tree_height: u32) -> f64 {
        interpolate(self.root_upper, self.leaf_upper, depth, tree_height)
    }

    /// Minimum density allowed at `depth` in a tree of `tree_height` levels.
    pub fn lower_limit(&self, depth: u32, tree_height: u32) -> f64 {
        interpolate(self.root_lower, self.leaf_lower, depth, tree_height)
    }
}

// A single-level tree is all leaf.
fn interpolate(root: f64, leaf: f64, depth: u32, tree_height: u32) -> f64 {
    if tree_height == 0 || depth >= tree_height {
        return leaf;
    }
    root + (leaf - root) * f64::from(depth) / f64::from(tree_height)
}

/// Density of `count` occupied slots in a span of `size` slots.
///
/// An empty span is treated as full so it never admits an insertion.
#[inline]
pub fn density(count: usize, size: usize) -> f64 {
    if size == 0 {
        return 1.0;
    }
    count as f64 / size as f64
}
