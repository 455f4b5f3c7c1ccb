//! Error types for the packed memory array.
//!
//! Every variant except [`Error::InvalidBounds`] reports a broken internal
//! invariant. Such errors are not retryable: the list that produced one is in
//! an unspecified state and should be dropped.

use thiserror::Error;

/// Error variants for ordered list operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The slot shifter found no empty slot to absorb the shift.
    #[error("no free slot around position {position} in segment [{begin}, {end})")]
    NoFreeSlot {
        /// Insertion boundary the shift was opening.
        position: usize,
        /// First slot of the scanned segment.
        begin: usize,
        /// One past the last slot of the scanned segment.
        end: usize,
    },

    /// The table was asked to shrink below a single leaf segment.
    #[error("cannot shrink a table of capacity {capacity} any further")]
    TableUnderflow {
        /// Capacity at the time of the request.
        capacity: usize,
    },

    /// A redistribution was asked to place more elements than its span holds.
    #[error("cannot spread {count} elements over {span} slots")]
    Overpacked {
        /// Occupied slots in the segment being redistributed.
        count: usize,
        /// Number of slots available to receive them.
        span: usize,
    },

    /// A density configuration was rejected.
    #[error("invalid density bounds: {0}")]
    InvalidBounds(String),
}

impl Error {
    /// Return true if this error signals a broken structural invariant
    /// rather than a rejected configuration.
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self, Error::InvalidBounds(_))
    }
}

/// A specialized Result type for ordered list operations.
pub type Result<T> = std::result::Result<T, Error>;
