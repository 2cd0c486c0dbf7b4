//! The [`SnapshotStore`] trait defining the persistence contract.
//!
//! A store is an append-only log of snapshots with a bulk clear. All
//! backends (InMemoryStore, SqliteStore) implement this trait, so they are
//! swappable without touching history or navigation logic.

use timetravel_core::Snapshot;

use crate::error::StorageError;
use crate::types::RecordId;

/// The storage contract for snapshot history.
///
/// The trait is synchronous. Callers that share a store across tasks are
/// expected to serialise access (the server keeps it behind an async mutex).
pub trait SnapshotStore {
    /// Prepares the store for use. Calling it on an open store is a no-op.
    ///
    /// Fails with [`StorageError::Unavailable`] if the backend refuses access.
    fn open(&mut self) -> Result<(), StorageError>;

    /// Appends one snapshot and returns its record ID.
    fn append(&mut self, snapshot: &Snapshot) -> Result<RecordId, StorageError>;

    /// Returns every stored snapshot in insertion order.
    fn list_all(&self) -> Result<Vec<Snapshot>, StorageError>;

    /// Removes every snapshot.
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Releases the store. Safe to call when already closed.
    fn close(&mut self);

    /// Whether [`open`](SnapshotStore::open) has succeeded and
    /// [`close`](SnapshotStore::close) has not been called since.
    fn is_open(&self) -> bool;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Box<S> {
    fn open(&mut self) -> Result<(), StorageError> {
        (**self).open()
    }

    fn append(&mut self, snapshot: &Snapshot) -> Result<RecordId, StorageError> {
        (**self).append(snapshot)
    }

    fn list_all(&self) -> Result<Vec<Snapshot>, StorageError> {
        (**self).list_all()
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        (**self).clear()
    }

    fn close(&mut self) {
        (**self).close()
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}
