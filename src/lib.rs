//! # Packed Memory Arrays
//!
//! *A sorted array that leaves itself room to grow.*
//!
//! ## Intuition First
//!
//! Imagine a bookshelf where the books must stay in alphabetical order.
//! If the shelf is packed tight, adding one book means sliding every book
//! after it along by one. If instead you leave a few empty spaces on each
//! shelf, a new book only pushes its neighbours as far as the nearest gap.
//!
//! The catch is keeping the gaps where they are needed. When one shelf fills
//! up you redistribute the books over it and its neighbour; when a whole
//! section fills up you redistribute the section; when the whole bookcase
//! fills up you buy one twice the size.
//!
//! ## The Problem
//!
//! Sorted sequences usually force a choice:
//! - **Sorted arrays**: Perfect locality and fast scans, but $O(n)$ inserts.
//! - **Search trees**: $O(\log n)$ inserts, but pointer chasing on every scan.
//!
//! A packed memory array keeps the array (order is position, no pointers)
//! while bringing the amortized insert cost down to $O(\log^2 n)$.
//!
//! ## Historical Context
//!
//! ```text
//! 1981  Itai-Konheim-Rodeh  Sparse tables for sequential files
//! 1992  Willard             Dense sequential files with worst-case bounds
//! 2000  Bender-Demaine-F.   Packed memory array in cache-oblivious B-trees
//! 2007  Bender-Hu           Adaptive packed memory array
//! ```
//!
//! ## Mathematical Formulation
//!
//! The array of $N$ slots is split into leaves of $\Theta(\log N)$ slots,
//! with an implicit complete binary tree above them. A node at depth $d$
//! must keep its density $\rho$ within $[\tau^-_d, \tau^+_d]$, bounds that
//! are tight at the root and loose at the leaves.
//!
//! - **Insert**: find the leaf; if it would overflow, walk up to the first
//!   ancestor within its bound and respace that ancestor evenly.
//! - **Delete**: symmetric, using the lower bounds.
//! - **Resize**: if the root is out of bounds, double or halve the array.
//!
//! ## Complexity Analysis
//!
//! - **Time**: $O(\log^2 n)$ amortized slot moves per update; $O(\log n)$
//!   probes per search.
//! - **Space**: $\Theta(n)$ slots.
//!
//! ## What Could Go Wrong
//!
//! 1. **Amortized, not worst case**: a single update may respace the whole
//!    array.
//! 2. **Sequential inserts**: appending in order always hits the same leaf,
//!    which is the adversarial case for the basic density scheme.
//!
//! ## Implementation Notes
//!
//! This crate provides:
//! - **`OrderedList`**: sorted multiset of `i64` with `include`, `erase`,
//!   `successor` and ordered iteration.
//! - **`DensityBounds`**: the tunable per-depth density policy.
//! - **`command`**: a line-oriented interpreter driving an `OrderedList`.
//!
//! ## References
//!
//! - Itai, A., Konheim, A., & Rodeh, M. (1981). "A sparse table implementation of priority queues."
//! - Bender, M. A., Demaine, E. D., & Farach-Colton, M. (2000). "Cache-oblivious B-trees."
//! - Bender, M. A., & Hu, H. (2007). "An adaptive packed-memory array."

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod command;
pub mod density;
pub mod error;
pub mod ordered_list;
pub mod segment;

pub use density::DensityBounds;
pub use error::Error;
pub use ordered_list::OrderedList;
