//! In-memory implementation of [`SnapshotStore`].
//!
//! [`InMemoryStore`] is a first-class backend for tests and ephemeral
//! sessions. It keeps records in a Vec with the same semantics as the
//! SQLite backend, including refusing every operation until opened.

use timetravel_core::Snapshot;

use crate::error::StorageError;
use crate::traits::SnapshotStore;
use crate::types::RecordId;

/// Vec-backed snapshot store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    open: bool,
    records: Vec<(RecordId, Snapshot)>,
    /// Next record ID; never reset, so IDs are not reused after a clear.
    next_id: i64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore::default()
    }

    /// Creates a store that already holds `snapshots` (oldest first).
    pub fn with_snapshots(snapshots: impl IntoIterator<Item = Snapshot>) -> Self {
        let mut store = InMemoryStore::new();
        for snapshot in snapshots {
            store.push(snapshot);
        }
        store
    }

    fn push(&mut self, snapshot: Snapshot) -> RecordId {
        self.next_id += 1;
        let id = RecordId(self.next_id);
        self.records.push((id, snapshot));
        id
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.open {
            Ok(())
        } else {
            Err(StorageError::not_open())
        }
    }
}

impl SnapshotStore for InMemoryStore {
    fn open(&mut self) -> Result<(), StorageError> {
        self.open = true;
        Ok(())
    }

    fn append(&mut self, snapshot: &Snapshot) -> Result<RecordId, StorageError> {
        self.ensure_open()?;
        Ok(self.push(snapshot.clone()))
    }

    fn list_all(&self) -> Result<Vec<Snapshot>, StorageError> {
        self.ensure_open()?;
        Ok(self.records.iter().map(|(_, s)| s.clone()).collect())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.ensure_open()?;
        self.records.clear();
        Ok(())
    }

    fn close(&mut self) {
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }
}
