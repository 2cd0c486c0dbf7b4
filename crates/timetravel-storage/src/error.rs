//! Storage error types for timetravel-storage.
//!
//! [`StorageError`] has one variant per failure class a persistence backend
//! can report: the store cannot be used at all, a write failed, or a read
//! failed. Backend-specific errors are folded into these with a reason
//! string so callers only ever match on the class.

use thiserror::Error;

/// Errors produced by snapshot store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The store could not be opened, or is not open.
    #[error("storage unavailable: {reason}")]
    Unavailable { reason: String },

    /// Appending or clearing records failed.
    #[error("storage write failed: {reason}")]
    Write { reason: String },

    /// Listing records failed.
    #[error("storage read failed: {reason}")]
    Read { reason: String },
}

impl StorageError {
    pub fn unavailable(reason: impl ToString) -> Self {
        StorageError::Unavailable {
            reason: reason.to_string(),
        }
    }

    pub fn write(reason: impl ToString) -> Self {
        StorageError::Write {
            reason: reason.to_string(),
        }
    }

    pub fn read(reason: impl ToString) -> Self {
        StorageError::Read {
            reason: reason.to_string(),
        }
    }

    /// The error returned by every operation on a closed store.
    pub(crate) fn not_open() -> Self {
        StorageError::unavailable("store is not open; call open() first")
    }
}
