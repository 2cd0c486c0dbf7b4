//! Core error types for timetravel-core.
//!
//! Navigation never fails (out-of-range input is a no-op), so the only
//! errors here come from looking up snapshots that are not there.

use thiserror::Error;

/// Core errors produced by the timetravel-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// There are no snapshots to operate on.
    #[error("history is empty")]
    EmptyHistory,

    /// A snapshot index is outside the current history.
    #[error("snapshot {index} out of range (history length {len})")]
    SnapshotOutOfRange { index: usize, len: usize },
}
