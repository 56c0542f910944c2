//! Configuration errors raised by chamber stores.
//!
//! Routine outcomes such as a full chamber or a mismatched fluid never show
//! up here; those come back as zero or empty results.

use thiserror::Error;

/// A device was wired up inconsistently.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChamberError {
    /// The snapshot name list does not line up with the chambers.
    #[error("expected {expected} tank names, one per chamber, but got {actual}")]
    TankNameMismatch {
        /// Number of chambers in the store.
        expected: usize,
        /// Number of names supplied.
        actual: usize,
    },
    /// An amount-only fill targeted a chamber with no fluid to add to.
    #[error("cannot add fluid with only an amount to empty chamber {index}")]
    KindlessFill {
        /// The empty chamber.
        index: usize,
    },
}
